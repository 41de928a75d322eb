use super::errors::{SimError, SimResult};
use super::types::ProcessId;
use std::collections::VecDeque;

/// Outcome of an acquisition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// A unit was free and is now held by the caller
    Immediate,
    /// The pool is at capacity; the caller waits at this queue position (0 = head)
    Queued(usize),
}

/// Fixed-capacity pool of interchangeable servers with a FIFO wait queue
#[derive(Debug, Clone)]
pub struct ResourcePool {
    name: &'static str,
    capacity: usize,
    held: usize,
    waiting: VecDeque<ProcessId>,
    peak_held: usize,
    peak_waiting: usize,
}

impl ResourcePool {
    /// Create a pool with the given capacity (must be at least 1)
    pub fn new(name: &'static str, capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::ZeroCapacity { pool: name });
        }
        Ok(Self {
            name,
            capacity,
            held: 0,
            waiting: VecDeque::new(),
            peak_held: 0,
            peak_waiting: 0,
        })
    }

    /// Request a unit for `process`
    pub fn acquire(&mut self, process: ProcessId) -> Grant {
        if self.is_saturated() {
            self.waiting.push_back(process);
            self.peak_waiting = self.peak_waiting.max(self.waiting.len());
            Grant::Queued(self.waiting.len() - 1)
        } else {
            self.held += 1;
            self.peak_held = self.peak_held.max(self.held);
            Grant::Immediate
        }
    }

    /// Return a unit to the pool
    ///
    /// If a process is waiting, the unit passes straight to the head of the
    /// queue and that process is returned so the caller can resume it.
    pub fn release(&mut self) -> SimResult<Option<ProcessId>> {
        if self.held == 0 {
            return Err(SimError::ReleaseWithoutHold { pool: self.name });
        }
        match self.waiting.pop_front() {
            Some(next) => Ok(Some(next)),
            None => {
                self.held -= 1;
                Ok(None)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units currently held
    pub fn held(&self) -> usize {
        self.held
    }

    /// Processes currently waiting for a unit
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    pub fn peak_held(&self) -> usize {
        self.peak_held
    }

    pub fn peak_waiting(&self) -> usize {
        self.peak_waiting
    }

    /// Check if every unit is held
    pub fn is_saturated(&self) -> bool {
        self.held >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ResourcePool::new("cashier", 0).unwrap_err();
        assert_eq!(err, SimError::ZeroCapacity { pool: "cashier" });
    }

    #[test]
    fn test_grants_until_capacity_then_queues() {
        let mut pool = ResourcePool::new("usher", 2).unwrap();
        assert_eq!(pool.acquire(ProcessId(0)), Grant::Immediate);
        assert_eq!(pool.acquire(ProcessId(1)), Grant::Immediate);
        assert!(pool.is_saturated());
        assert_eq!(pool.acquire(ProcessId(2)), Grant::Queued(0));
        assert_eq!(pool.acquire(ProcessId(3)), Grant::Queued(1));
        assert_eq!(pool.held(), 2);
        assert_eq!(pool.queue_len(), 2);
    }

    #[test]
    fn test_release_hands_off_in_fifo_order() {
        let mut pool = ResourcePool::new("server", 1).unwrap();
        pool.acquire(ProcessId(10));
        pool.acquire(ProcessId(11));
        pool.acquire(ProcessId(12));

        assert_eq!(pool.release().unwrap(), Some(ProcessId(11)));
        assert_eq!(pool.held(), 1, "handoff keeps the unit held");
        assert_eq!(pool.release().unwrap(), Some(ProcessId(12)));
        assert_eq!(pool.release().unwrap(), None);
        assert_eq!(pool.held(), 0);
        assert_eq!(pool.peak_held(), 1);
        assert_eq!(pool.peak_waiting(), 2);
    }

    #[test]
    fn test_release_without_hold_is_an_error() {
        let mut pool = ResourcePool::new("cashier", 3).unwrap();
        assert_eq!(
            pool.release(),
            Err(SimError::ReleaseWithoutHold { pool: "cashier" })
        );
    }
}
