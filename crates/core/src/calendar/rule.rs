//! Recurrence rule parsing and cursor stepping.
//!
//! Only `FREQ` and `INTERVAL` are understood, a deliberately small slice of
//! RRULE syntax. Parsing never fails on a non-empty string: unknown keys,
//! malformed segments and bad interval values all degrade to defaults. That
//! permissiveness is part of the contract, not an accident.

use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Recurrence cadence recognized by the rule parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Maps a raw `FREQ` value; anything unrecognized yields `None`.
    fn from_value(value: &str) -> Option<Self> {
        match value {
            "DAILY" => Some(Frequency::Daily),
            "WEEKLY" => Some(Frequency::Weekly),
            "MONTHLY" => Some(Frequency::Monthly),
            _ => None,
        }
    }
}

/// A parsed recurrence rule: cadence plus step interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// `None` when `FREQ` was missing or unrecognized; stepping then falls
    /// back to one day per advance, ignoring the interval.
    pub frequency: Option<Frequency>,
    pub interval: u32,
}

impl RecurrenceRule {
    /// Parses a semicolon-delimited rule string such as
    /// `FREQ=WEEKLY;INTERVAL=2`.
    ///
    /// Returns `None` only for an empty input. Segments without exactly one
    /// `=` are ignored, keys are matched case-sensitively, and an `INTERVAL`
    /// that does not parse as a positive integer falls back to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac_core::calendar::{Frequency, RecurrenceRule};
    ///
    /// let rule = RecurrenceRule::parse("FREQ=WEEKLY;INTERVAL=2").unwrap();
    /// assert_eq!(rule.frequency, Some(Frequency::Weekly));
    /// assert_eq!(rule.interval, 2);
    ///
    /// assert!(RecurrenceRule::parse("").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let mut frequency = None;
        let mut interval = 1;

        for segment in raw.split(';') {
            let mut parts = segment.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };
            match key.trim() {
                "FREQ" => frequency = Frequency::from_value(value.trim()),
                "INTERVAL" => {
                    interval = value
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n >= 1)
                        .unwrap_or(1);
                }
                _ => {}
            }
        }

        Some(Self { frequency, interval })
    }

    /// Advances a cursor by one step of this rule.
    ///
    /// Monthly stepping uses calendar month arithmetic with end-of-month
    /// clamping (Jan 31 + 1 month lands on the last day of February).
    /// Returns `None` when the step would leave the representable range.
    pub fn advance(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.frequency {
            Some(Frequency::Daily) => {
                from.checked_add_signed(Duration::days(i64::from(self.interval)))
            }
            Some(Frequency::Weekly) => {
                from.checked_add_signed(Duration::weeks(i64::from(self.interval)))
            }
            Some(Frequency::Monthly) => from.checked_add_months(Months::new(self.interval)),
            None => from.checked_add_signed(Duration::days(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(RecurrenceRule::parse("").is_none());
    }

    #[test]
    fn test_parse_freq_and_interval() {
        let rule = RecurrenceRule::parse("FREQ=MONTHLY;INTERVAL=3").unwrap();

        assert_eq!(rule.frequency, Some(Frequency::Monthly));
        assert_eq!(rule.interval, 3);
    }

    #[test]
    fn test_parse_defaults_interval_to_one() {
        let rule = RecurrenceRule::parse("FREQ=DAILY").unwrap();

        assert_eq!(rule.frequency, Some(Frequency::Daily));
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn test_parse_unrecognized_frequency_kept_as_none() {
        let rule = RecurrenceRule::parse("FREQ=YEARLY").unwrap();

        assert_eq!(rule.frequency, None);
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn test_parse_keys_are_case_sensitive() {
        let rule = RecurrenceRule::parse("freq=DAILY;interval=5").unwrap();

        assert_eq!(rule.frequency, None);
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn test_parse_ignores_malformed_segments() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;BYDAY=MO=TU;;INTERVAL=2").unwrap();

        assert_eq!(rule.frequency, Some(Frequency::Weekly));
        assert_eq!(rule.interval, 2);
    }

    #[test]
    fn test_parse_bad_interval_falls_back_to_one() {
        for raw in ["INTERVAL=abc", "INTERVAL=0", "INTERVAL=-2", "INTERVAL=1.5"] {
            let rule = RecurrenceRule::parse(raw).unwrap();
            assert_eq!(rule.interval, 1, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_trims_whitespace_around_key_and_value() {
        let rule = RecurrenceRule::parse(" FREQ = WEEKLY ; INTERVAL = 2 ").unwrap();

        assert_eq!(rule.frequency, Some(Frequency::Weekly));
        assert_eq!(rule.interval, 2);
    }

    #[test]
    fn test_advance_daily_with_interval() {
        let rule = RecurrenceRule::parse("FREQ=DAILY;INTERVAL=2").unwrap();

        assert_eq!(
            rule.advance(make_date(2024, 1, 15)),
            Some(make_date(2024, 1, 17))
        );
    }

    #[test]
    fn test_advance_weekly() {
        let rule = RecurrenceRule::parse("FREQ=WEEKLY;INTERVAL=2").unwrap();

        assert_eq!(
            rule.advance(make_date(2024, 1, 15)),
            Some(make_date(2024, 1, 29))
        );
    }

    #[test]
    fn test_advance_monthly_clamps_to_end_of_month() {
        let rule = RecurrenceRule::parse("FREQ=MONTHLY").unwrap();

        assert_eq!(
            rule.advance(make_date(2024, 1, 31)),
            Some(make_date(2024, 2, 29))
        );
        assert_eq!(
            rule.advance(make_date(2023, 1, 31)),
            Some(make_date(2023, 2, 28))
        );
    }

    #[test]
    fn test_advance_unrecognized_frequency_steps_one_day() {
        let rule = RecurrenceRule::parse("FREQ=YEARLY;INTERVAL=4").unwrap();

        assert_eq!(
            rule.advance(make_date(2024, 1, 15)),
            Some(make_date(2024, 1, 16))
        );
    }

    #[test]
    fn test_advance_at_range_limit_is_none() {
        let rule = RecurrenceRule::parse("FREQ=DAILY").unwrap();

        assert_eq!(rule.advance(NaiveDateTime::MAX), None);
    }
}
