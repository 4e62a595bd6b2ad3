#[cfg(test)]
mod tests {
    use cron_timeline::rollup::{Cadence, StyleTable};
    use cron_timeline::{CronError, Crontab, FieldKind, TimeWindow};

    const EARLIEST_TIME: &str = "2011-10-11 00:00";
    const LATEST_TIME: &str = "2011-10-12 00:00";

    fn crontab_between(earliest: &str, latest: &str, input: &str) -> Crontab {
        let window = TimeWindow::parse(earliest, latest).unwrap();
        let mut crontab = Crontab::new(window, StyleTable::default());
        crontab.load_str(input).unwrap();
        crontab
    }

    fn crontab(input: &str) -> Crontab {
        crontab_between(EARLIEST_TIME, LATEST_TIME, input)
    }

    fn stamp(crontab: &Crontab, job: usize, index: usize) -> String {
        crontab.jobs()[job].times[index]
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }

    #[test]
    fn dates_no_earlier_than_window() {
        let crontab = crontab("17 */3 11 10 * do_some_stuff");
        assert!(stamp(&crontab, 0, 0).as_str() >= EARLIEST_TIME);
        assert_eq!(crontab.jobs()[0].times.len(), 8);
    }

    #[test]
    fn dates_no_later_than_window() {
        let crontab = crontab("17 */3 */2 * * do_some_stuff");
        let last = crontab.jobs()[0].times.len() - 1;
        assert!(stamp(&crontab, 0, last).as_str() <= LATEST_TIME);
    }

    #[test]
    fn dates_respect_day_of_week() {
        let crontab = crontab_between(
            "2011-10-06 00:00",
            "2011-10-17 23:59",
            "0 17 * * 4,5 launch_happy_hour",
        );
        assert_eq!(crontab.jobs()[0].times.len(), 4);
    }

    #[test]
    fn single_line() {
        let crontab = crontab("*/5 5,6,7 11 10 2 do_some_stuff");
        assert_eq!(crontab.jobs().len(), 1);
        assert_eq!(crontab.jobs()[0].times.len(), 36);
    }

    #[test]
    fn multiple_lines() {
        let crontab = crontab("17-21 */3 11 10 * do_some_stuff\n* * 11 10 * do_other_stuff");
        assert_eq!(crontab.jobs().len(), 2);
        assert_eq!(crontab.jobs()[0].times.len(), 40);
        assert_eq!(crontab.jobs()[1].times.len(), 1440);
    }

    #[test]
    fn rollup_every_minute() {
        let crontab = crontab("* * * * * run_every_minute");
        assert_eq!(crontab.jobs()[0].events.len(), 1);
        assert_eq!(crontab.jobs()[0].cadence, Cadence::EveryMinute);
    }

    #[test]
    fn rollup_every_five_minutes() {
        let crontab = crontab("*/5 * * * * run_every_five_minute");
        assert_eq!(crontab.jobs()[0].events.len(), 1);
        assert_eq!(crontab.jobs()[0].cadence, Cadence::EveryFiveMinutes);
    }

    #[test]
    fn no_rollup_every_six_minutes() {
        let crontab = crontab("*/6 * * * * run_every_six_minutes");
        assert_eq!(crontab.jobs()[0].events.len(), 241);
        assert_eq!(crontab.jobs()[0].cadence, Cadence::None);
    }

    #[test]
    fn rollup_every_minute_over_a_few_minutes() {
        let crontab = crontab_between(
            "2011-10-11 00:00",
            "2011-10-11 00:08",
            "* * * * * run_every_minute",
        );
        assert_eq!(crontab.jobs()[0].events.len(), 1);
    }

    #[test]
    fn rollup_every_five_minutes_over_a_few_hours() {
        let crontab = crontab_between(
            "2011-10-11 00:01",
            "2011-10-11 02:59",
            "*/5 * * * * run_every_five_minutes",
        );
        assert_eq!(crontab.jobs()[0].events.len(), 1);
        let event = &crontab.jobs()[0].events[0];
        assert_eq!(event.start.format("%H:%M").to_string(), "00:05");
        assert_eq!(event.end.unwrap().format("%H:%M").to_string(), "02:55");
    }

    #[test]
    fn rollup_every_minute_over_a_few_days() {
        let crontab = crontab_between(
            "2011-10-11 00:00",
            "2011-10-13 00:12",
            "* * * * * run_every_minute",
        );
        assert_eq!(crontab.jobs()[0].events.len(), 1);
    }

    #[test]
    fn rollup_every_five_minutes_over_a_few_days() {
        let crontab = crontab_between(
            "2011-10-11 00:00",
            "2011-10-12 12:59",
            "*/5 * * * * run_every_five_minutes",
        );
        assert_eq!(crontab.jobs()[0].events.len(), 1);
    }

    #[test]
    fn one_minute_window_rolls_up_as_every_minute() {
        let crontab = crontab_between(
            "2011-10-11 00:00",
            "2011-10-11 00:00",
            "* * * * * tick\n0 0 * * * midnight",
        );
        for job in crontab.jobs() {
            assert_eq!(job.times.len(), 1);
            assert_eq!(job.cadence, Cadence::EveryMinute);
        }
    }

    #[test]
    fn weekday_list_covering_the_week_is_not_filtered() {
        let crontab = crontab("0 12 * * 6,5,4,3,2,1,0 lunch\n0 12 * * * lunch_again");
        assert_eq!(crontab.jobs()[0].times, crontab.jobs()[1].times);
    }

    #[test]
    fn malformed_token_names_field_and_line() {
        let window = TimeWindow::parse(EARLIEST_TIME, LATEST_TIME).unwrap();
        let mut crontab = Crontab::new(window, StyleTable::default());

        let err = crontab
            .load_str("0 * * * * ok\n\n*/0 * * * * broken")
            .unwrap_err();
        assert_eq!(err.to_string(), "Line 3: Invalid minute field: \"*/0\"");
        match err {
            CronError::Line { source, .. } => match *source {
                CronError::InvalidToken { field, token } => {
                    assert_eq!(field, FieldKind::Minute);
                    assert_eq!(token, "*/0");
                }
                other => panic!("unexpected error: {other}"),
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reversed_window_is_rejected() {
        let err = TimeWindow::parse(LATEST_TIME, EARLIEST_TIME).unwrap_err();
        assert!(matches!(err, CronError::InvalidWindow { .. }));
    }

    #[test]
    fn same_input_gives_same_timeline() {
        let input = "*/6 * * * * six\n17-21 */3 11 10 * stuff\n* * * * * tick";
        assert_eq!(crontab(input).to_json().unwrap(), crontab(input).to_json().unwrap());
    }
}
