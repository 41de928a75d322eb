use super::errors::{SimError, SimResult};
use super::types::SimTime;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent<E> {
    pub time: SimTime,
    pub sequence_num: u64,
    pub event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence_num == other.sequence_num
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Time-ordered event queue that owns the simulated clock
///
/// Events sharing a timestamp come out in insertion order. The clock only
/// moves when [`EventScheduler::pop_next`] hands out the next event.
pub struct EventScheduler<E> {
    event_queue: BinaryHeap<ScheduledEvent<E>>,
    sequence_counter: u64,
    now: SimTime,
}

impl<E> EventScheduler<E> {
    /// Create a new EventScheduler at time zero
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            now: SimTime::ZERO,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule an event to execute `delay` minutes from now
    pub fn schedule_event(&mut self, event: E, delay: f64) -> SimResult<()> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SimError::InvalidDelay(delay));
        }

        let scheduled_event = ScheduledEvent {
            time: self.now + delay,
            sequence_num: self.sequence_counter,
            event,
        };

        self.event_queue.push(scheduled_event);
        self.sequence_counter += 1;
        Ok(())
    }

    /// Remove the earliest event and advance the clock to its timestamp
    pub fn pop_next(&mut self) -> Option<E> {
        let scheduled_event = self.event_queue.pop()?;
        debug_assert!(scheduled_event.time >= self.now);
        self.now = scheduled_event.time;
        Some(scheduled_event.event)
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Get the timestamp of the next event without removing it
    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|event| event.time)
    }
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
