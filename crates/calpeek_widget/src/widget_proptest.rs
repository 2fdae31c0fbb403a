#[cfg(test)]
mod tests {
    use crate::widget::{clamp_days, MAX_DAYS, MIN_DAYS};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamped_days_stay_in_range(input in any::<f64>()) {
            match clamp_days(input) {
                Some(days) => {
                    prop_assert!(input.is_finite());
                    prop_assert!((MIN_DAYS..=MAX_DAYS).contains(&days));
                }
                None => prop_assert!(!input.is_finite()),
            }
        }

        #[test]
        fn in_range_input_is_truncated(input in 1.0f64..31.0) {
            prop_assert_eq!(clamp_days(input), Some((input.trunc() as u32).min(MAX_DAYS)));
        }
    }

    #[test]
    fn test_clamp_edges() {
        assert_eq!(clamp_days(0.0), Some(1));
        assert_eq!(clamp_days(-4.0), Some(1));
        assert_eq!(clamp_days(0.5), Some(1));
        assert_eq!(clamp_days(99.0), Some(30));
        assert_eq!(clamp_days(12.9), Some(12));
        assert_eq!(clamp_days(f64::NAN), None);
        assert_eq!(clamp_days(f64::NEG_INFINITY), None);
    }
}
