use super::errors::SimResult;
use super::event_scheduler::EventScheduler;
use super::types::SimTime;
use log::trace;

/// Reacts to events popped off the queue
///
/// Handlers schedule follow-up events through the scheduler they are given;
/// they never touch the clock directly.
pub trait EventHandler {
    type Event;

    fn handle(
        &mut self,
        event: Self::Event,
        scheduler: &mut EventScheduler<Self::Event>,
    ) -> SimResult<()>;

    /// Called when simulated time advances, before the new event is handled
    fn on_time_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}
}

pub struct SimulationEngine<E> {
    scheduler: EventScheduler<E>,
    time_limit: Option<SimTime>,
    events_processed: u64,
}

impl<E> SimulationEngine<E> {
    /// Create a new SimulationEngine with an optional time limit
    pub fn new(time_limit: Option<SimTime>) -> Self {
        Self {
            scheduler: EventScheduler::new(),
            time_limit,
            events_processed: 0,
        }
    }

    /// Schedule an initial event to start the simulation
    pub fn schedule_initial_event(&mut self, event: E, delay: f64) -> SimResult<()> {
        self.scheduler.schedule_event(event, delay)
    }

    /// Run until the queue drains or the time limit is reached, returns final time
    pub fn run<H>(&mut self, handler: &mut H) -> SimResult<SimTime>
    where
        H: EventHandler<Event = E>,
    {
        while self.step(handler)? {}
        Ok(self.current_time())
    }

    /// Process one event, returns true if more work remains
    pub fn step<H>(&mut self, handler: &mut H) -> SimResult<bool>
    where
        H: EventHandler<Event = E>,
    {
        if let (Some(limit), Some(next)) = (self.time_limit, self.scheduler.peek_next_time()) {
            if next > limit {
                return Ok(false);
            }
        }

        let old_time = self.scheduler.now();
        let Some(event) = self.scheduler.pop_next() else {
            return Ok(false);
        };
        let new_time = self.scheduler.now();

        if old_time != new_time {
            trace!(
                "clock {} -> {} ({} pending)",
                old_time,
                new_time,
                self.scheduler.pending()
            );
            handler.on_time_advance(old_time, new_time);
        }

        handler.handle(event, &mut self.scheduler)?;
        self.events_processed += 1;

        Ok(self.has_pending_events())
    }

    /// Get current simulation time
    pub fn current_time(&self) -> SimTime {
        self.scheduler.now()
    }

    /// Total events handled so far
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Check if there are pending events in the scheduler
    pub fn has_pending_events(&self) -> bool {
        self.scheduler.has_events()
    }
}

impl<E> Default for SimulationEngine<E> {
    fn default() -> Self {
        Self::new(None)
    }
}
