use crate::core::rng::SimRng;
use crate::core::types::{ProcessId, SimTime};

use super::customer::Customer;
use super::service::ServiceSampler;

/// Stream reserved for inter-arrival draws; customers use `1 + id`
const ARRIVAL_STREAM: u64 = 0;

/// Produces customers at random intervals until the horizon
///
/// Inter-arrival gaps come from their own random stream and every customer
/// gets a private stream keyed by its sequence number, so the customers of
/// a trial do not depend on how the theater is staffed.
#[derive(Debug)]
pub struct ArrivalGenerator {
    trial_seed: u64,
    rng: SimRng,
    horizon: SimTime,
    next_id: u64,
}

impl ArrivalGenerator {
    pub fn new(trial_seed: u64, horizon: SimTime) -> Self {
        Self {
            trial_seed,
            rng: SimRng::for_stream(trial_seed, ARRIVAL_STREAM),
            horizon,
            next_id: 0,
        }
    }

    /// Delay until the next arrival, or `None` once it would land at or past the horizon
    pub fn next_arrival(&mut self, now: SimTime, sampler: &ServiceSampler) -> Option<f64> {
        let delay = sampler.inter_arrival(&mut self.rng);
        (now + delay < self.horizon).then_some(delay)
    }

    /// Create the next customer, arriving at `now`
    pub fn spawn(&mut self, now: SimTime) -> Customer {
        let id = ProcessId(self.next_id);
        self.next_id += 1;
        let rng = SimRng::for_stream(self.trial_seed, ARRIVAL_STREAM + 1 + id.index());
        Customer::new(id, now, rng)
    }

    /// Customers created so far
    pub fn spawned(&self) -> u64 {
        self.next_id
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }
}
