#[cfg(test)]
mod tests {
    use crate::logic::*;
    use calpeek_common::models::IssueCode;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn accepts_every_day_count_in_range(days in MIN_DAYS..=MAX_DAYS) {
            prop_assert_eq!(validate_days(Some(days.to_string().as_str())), Ok(days));
        }

        #[test]
        fn rejects_counts_above_range(days in (MAX_DAYS as i64 + 1)..1_000_000i64) {
            let issues = validate_days(Some(days.to_string().as_str())).unwrap_err();
            prop_assert_eq!(issues.len(), 1);
            prop_assert_eq!(issues[0].code, IssueCode::TooBig);
        }

        #[test]
        fn rejects_counts_below_range(days in -1_000_000i64..(MIN_DAYS as i64)) {
            let issues = validate_days(Some(days.to_string().as_str())).unwrap_err();
            prop_assert_eq!(issues.len(), 1);
            prop_assert_eq!(issues[0].code, IssueCode::TooSmall);
        }

        #[test]
        fn rejects_fractional_counts(whole in 1u32..30, tenths in 1u32..10) {
            let raw = format!("{whole}.{tenths}");
            let issues = validate_days(Some(raw.as_str())).unwrap_err();
            prop_assert_eq!(issues[0].code, IssueCode::InvalidType);
        }

        #[test]
        fn rejects_alphabetic_input(raw in "[a-zA-Z]{1,12}") {
            // "inf", "infinity" and "nan" parse as floats but are not finite.
            let issues = validate_days(Some(raw.as_str())).unwrap_err();
            prop_assert_eq!(issues[0].code, IssueCode::InvalidType);
        }

        #[test]
        fn window_length_is_exactly_days(
            secs in 0i64..4_000_000_000i64,
            millis in 0u32..1000,
            days in MIN_DAYS..=MAX_DAYS,
        ) {
            let now = Utc.timestamp_opt(secs, millis * 1_000_000).unwrap();
            let window = LookAheadWindow::starting_at(now, days);
            prop_assert_eq!(window.time_min, now);
            prop_assert_eq!(window.time_max - window.time_min, Duration::days(days as i64));
        }
    }
}
