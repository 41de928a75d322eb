// Tests for SimulationEngine functionality
#[cfg(test)]
mod tests {
    use crate::core::errors::{SimError, SimResult};
    use crate::core::event_scheduler::EventScheduler;
    use crate::core::simulation_engine::{EventHandler, SimulationEngine};
    use crate::core::types::SimTime;

    /// Re-schedules itself every `period` minutes, `remaining` more times
    struct Ticker {
        period: f64,
        remaining: u32,
        handled: Vec<SimTime>,
        advances: Vec<(SimTime, SimTime)>,
    }

    impl Ticker {
        fn new(period: f64, remaining: u32) -> Self {
            Self {
                period,
                remaining,
                handled: Vec::new(),
                advances: Vec::new(),
            }
        }
    }

    impl EventHandler for Ticker {
        type Event = ();

        fn handle(&mut self, _event: (), scheduler: &mut EventScheduler<()>) -> SimResult<()> {
            self.handled.push(scheduler.now());
            if self.remaining > 0 {
                self.remaining -= 1;
                scheduler.schedule_event((), self.period)?;
            }
            Ok(())
        }

        fn on_time_advance(&mut self, old_time: SimTime, new_time: SimTime) {
            self.advances.push((old_time, new_time));
        }
    }

    #[test]
    fn test_run_drains_queue() {
        let mut engine = SimulationEngine::new(None);
        let mut ticker = Ticker::new(1.5, 3);
        engine.schedule_initial_event((), 0.0).unwrap();

        let end = engine.run(&mut ticker).unwrap();

        assert_eq!(end, SimTime::from_minutes(4.5));
        assert_eq!(engine.events_processed(), 4);
        assert!(!engine.has_pending_events());
        assert_eq!(ticker.handled.len(), 4);
        // The first event fires at t=0, so only three advances are reported
        assert_eq!(ticker.advances.len(), 3);
        assert_eq!(ticker.advances[0], (SimTime::ZERO, SimTime::from_minutes(1.5)));
    }

    #[test]
    fn test_step_return_value() {
        let mut engine = SimulationEngine::new(None);
        let mut ticker = Ticker::new(1.0, 1);
        engine.schedule_initial_event((), 1.0).unwrap();

        assert!(engine.step(&mut ticker).unwrap(), "follow-up was scheduled");
        assert!(!engine.step(&mut ticker).unwrap());
        assert!(!engine.step(&mut ticker).unwrap(), "stepping an empty engine is a no-op");
        assert_eq!(engine.current_time(), SimTime::from_minutes(2.0));
    }

    #[test]
    fn test_time_limit_stops_early() {
        let mut engine = SimulationEngine::new(Some(SimTime::from_minutes(3.0)));
        let mut ticker = Ticker::new(1.0, 100);
        engine.schedule_initial_event((), 0.0).unwrap();

        let end = engine.run(&mut ticker).unwrap();

        assert_eq!(end, SimTime::from_minutes(3.0));
        assert_eq!(ticker.handled.len(), 4);
        assert!(engine.has_pending_events());
    }

    #[test]
    fn test_handler_errors_propagate() {
        struct Failing;
        impl EventHandler for Failing {
            type Event = ();
            fn handle(&mut self, _: (), scheduler: &mut EventScheduler<()>) -> SimResult<()> {
                scheduler.schedule_event((), -1.0)
            }
        }

        let mut engine = SimulationEngine::new(None);
        engine.schedule_initial_event((), 0.0).unwrap();
        assert_eq!(engine.run(&mut Failing), Err(SimError::InvalidDelay(-1.0)));
    }
}
