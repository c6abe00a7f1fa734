#[cfg(test)]
mod tests {
    use crate::cadence::Cadence;
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_new_cadence_is_stopped() {
        let mut cadence = Cadence::new(ms(400));
        assert!(!cadence.is_running());
        assert_eq!(cadence.advance(ms(1000)), 0);
        assert_eq!(cadence.until_next(), None);
    }

    #[test]
    fn test_due_ticks() {
        let mut cadence = Cadence::new(ms(400));
        cadence.rearm(ms(100));

        assert_eq!(cadence.advance(ms(99)), 0);
        assert_eq!(cadence.advance(ms(1)), 1);
        assert_eq!(cadence.advance(ms(250)), 2);
        assert_eq!(cadence.until_next(), Some(ms(50)));
    }

    #[test]
    fn test_rearm_resets_elapsed() {
        let mut cadence = Cadence::default();
        cadence.rearm(ms(400));
        cadence.advance(ms(300));

        cadence.rearm(ms(350));
        assert!(cadence.is_running());
        assert_eq!(cadence.period(), ms(350));
        assert_eq!(cadence.until_next(), Some(ms(350)));
        assert_eq!(cadence.advance(ms(349)), 0);
        assert_eq!(cadence.advance(ms(1)), 1);
    }

    #[test]
    fn test_stop_then_rearm() {
        let mut cadence = Cadence::default();
        cadence.rearm(ms(100));
        cadence.advance(ms(60));

        cadence.stop();
        assert!(!cadence.is_running());
        assert_eq!(cadence.advance(ms(500)), 0);
        assert_eq!(cadence.until_next(), None);

        // Partial progress from before the stop is dropped
        cadence.rearm(ms(100));
        assert_eq!(cadence.until_next(), Some(ms(100)));
        assert_eq!(cadence.advance(ms(40)), 0);
    }

    #[test]
    fn test_rearm_is_counted() {
        let mut cadence = Cadence::default();
        assert_eq!(cadence.arms(), 0);

        cadence.rearm(ms(100));
        cadence.advance(ms(250));
        cadence.stop();
        assert_eq!(cadence.arms(), 1);

        // Same period still counts
        cadence.rearm(ms(100));
        assert_eq!(cadence.arms(), 2);
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut cadence = Cadence::default();
        cadence.rearm(Duration::ZERO);
        assert_eq!(cadence.advance(ms(100)), 0);
    }
}
