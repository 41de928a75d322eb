// Tests for EventScheduler ordering and clock handling
#[cfg(test)]
mod tests {
    use crate::core::errors::SimError;
    use crate::core::event_scheduler::EventScheduler;
    use crate::core::types::SimTime;

    #[test]
    fn test_events_come_out_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_event("late", 5.0).unwrap();
        scheduler.schedule_event("early", 1.0).unwrap();
        scheduler.schedule_event("middle", 2.5).unwrap();

        assert_eq!(scheduler.pop_next(), Some("early"));
        assert_eq!(scheduler.now(), SimTime::from_minutes(1.0));
        assert_eq!(scheduler.pop_next(), Some("middle"));
        assert_eq!(scheduler.pop_next(), Some("late"));
        assert_eq!(scheduler.now(), SimTime::from_minutes(5.0));
        assert_eq!(scheduler.pop_next(), None);
        assert_eq!(scheduler.now(), SimTime::from_minutes(5.0), "empty pop keeps the clock");
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut scheduler = EventScheduler::new();
        for i in 0..10 {
            scheduler.schedule_event(i, 3.0).unwrap();
        }
        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop_next()).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_event('a', 2.0).unwrap();
        scheduler.pop_next();
        scheduler.schedule_event('b', 0.5).unwrap();
        scheduler.schedule_event('c', 0.0).unwrap();

        assert_eq!(scheduler.peek_next_time(), Some(SimTime::from_minutes(2.0)));
        assert_eq!(scheduler.pop_next(), Some('c'));
        assert_eq!(scheduler.pop_next(), Some('b'));
        assert_eq!(scheduler.now(), SimTime::from_minutes(2.5));
    }

    #[test]
    fn test_invalid_delays_rejected() {
        let mut scheduler = EventScheduler::new();
        assert_eq!(scheduler.schedule_event((), -0.1), Err(SimError::InvalidDelay(-0.1)));
        assert!(scheduler.schedule_event((), f64::NAN).is_err());
        assert!(scheduler.schedule_event((), f64::INFINITY).is_err());
        assert!(!scheduler.has_events());
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut scheduler = EventScheduler::new();
        let delays = [4.0, 0.5, 3.2, 0.5, 9.9, 0.0, 1.25];
        for (i, delay) in delays.iter().enumerate() {
            scheduler.schedule_event(i, *delay).unwrap();
        }

        let mut last = scheduler.now();
        while let Some(i) = scheduler.pop_next() {
            assert!(scheduler.now() >= last);
            last = scheduler.now();
            // Re-schedule a few follow-ups from the new time
            if i < 3 {
                scheduler.schedule_event(i + 100, 0.75).unwrap();
            }
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
