#[cfg(test)]
mod tests {
    use crate::format::{format_busy, format_instant, sort_busy, DisplayOptions};
    use calpeek_common::models::BusyInterval;
    use chrono::Locale;
    use chrono_tz::Tz;

    fn posix(time_zone: Tz) -> DisplayOptions {
        DisplayOptions {
            locale: Locale::POSIX,
            time_zone,
        }
    }

    fn interval(start: &str, end: &str) -> BusyInterval {
        BusyInterval {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    #[test]
    fn test_instant_uses_medium_date_and_time() {
        assert_eq!(
            format_instant("2024-01-02T10:00:00.000Z", &posix(Tz::UTC)),
            "01/02/24, 10:00:00"
        );
    }

    #[test]
    fn test_date_layout_follows_locale() {
        let at = |locale| {
            format_instant(
                "2024-01-02T15:00:00Z",
                &DisplayOptions {
                    locale,
                    time_zone: Tz::UTC,
                },
            )
        };
        assert_eq!(at(Locale::en_US), "01/02/2024, 03:00:00 PM");
        assert_eq!(at(Locale::de_DE), "02.01.2024, 15:00:00");
    }

    #[test]
    fn test_instant_is_shown_in_viewer_time_zone() {
        assert_eq!(
            format_instant("2024-01-02T10:00:00Z", &posix(Tz::Europe__Berlin)),
            "01/02/24, 11:00:00"
        );
        assert_eq!(
            format_instant("2024-01-02T10:00:00+02:00", &posix(Tz::UTC)),
            "01/02/24, 08:00:00"
        );
    }

    #[test]
    fn test_unparseable_instant_is_rendered_raw() {
        assert_eq!(format_instant("tomorrow-ish", &posix(Tz::UTC)), "tomorrow-ish");
    }

    #[test]
    fn test_sort_is_stable_and_puts_unparseable_last() {
        let sorted = sort_busy(vec![
            interval("bad-1", "x"),
            interval("2024-01-03T09:00:00Z", "a"),
            interval("2024-01-02T09:00:00Z", "b"),
            interval("bad-2", "y"),
            interval("2024-01-03T10:00:00+01:00", "c"),
        ]);
        let ends: Vec<&str> = sorted.iter().map(|i| i.end.as_str()).collect();
        // "c" starts at the same instant as "a" and keeps its position after it.
        assert_eq!(ends, vec!["b", "a", "c", "x", "y"]);
    }

    #[test]
    fn test_label_joins_start_and_end() {
        let rows = format_busy(
            vec![interval("2024-01-02T10:00:00Z", "2024-01-02T11:30:00Z")],
            &posix(Tz::UTC),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "01/02/24, 10:00:00 – 01/02/24, 11:30:00");
    }
}
