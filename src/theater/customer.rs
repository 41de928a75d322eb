//! A single moviegoer, modelled as a resumable state machine
//!
//! ```text
//! Arrived -> BuyingTicket -> TicketChecked -+-> BuysFood --+-> Done
//!                                           +-> SkipsFood -+
//! ```
//!
//! Each call to [`Customer::resume`] runs the customer up to its next
//! suspension point and hands back a [`Directive`] for the trial to carry out.

use crate::core::rng::SimRng;
use crate::core::types::{ProcessId, SimTime};

use super::service::ServiceSampler;
use super::staffing::PoolRole;

/// Where a customer is in the pipeline
///
/// Declared in visiting order, so a customer's stage only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Arrived,
    BuyingTicket,
    TicketChecked,
    BuysFood,
    SkipsFood,
    Done,
}

impl Stage {
    /// Pool a customer uses while in this stage
    pub fn pool(self) -> Option<PoolRole> {
        match self {
            Stage::BuyingTicket => Some(PoolRole::Cashier),
            Stage::TicketChecked => Some(PoolRole::Usher),
            Stage::BuysFood => Some(PoolRole::Server),
            Stage::Arrived | Stage::SkipsFood | Stage::Done => None,
        }
    }
}

/// What a customer needs from the trial before it can continue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Take one unit of the pool, suspending while none is free
    Acquire(PoolRole),
    /// Keep the held unit for this many minutes
    Hold(f64),
    /// Give the held unit back and resume straight away
    Release(PoolRole),
    /// Finished; carries time-in-system in minutes
    Depart(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Request,
    Serve,
    Release,
}

#[derive(Debug)]
pub struct Customer {
    id: ProcessId,
    arrival: SimTime,
    departure: Option<SimTime>,
    stage: Stage,
    phase: Phase,
    rng: SimRng,
}

impl Customer {
    /// A customer arriving at `now`, drawing from its own random stream
    pub fn new(id: ProcessId, now: SimTime, rng: SimRng) -> Self {
        Self {
            id,
            arrival: now,
            departure: None,
            stage: Stage::Arrived,
            phase: Phase::Request,
            rng,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    pub fn departure(&self) -> Option<SimTime> {
        self.departure
    }

    /// Run to the next suspension point
    pub fn resume(&mut self, now: SimTime, sampler: &ServiceSampler) -> Directive {
        if self.stage == Stage::Arrived {
            self.enter(Stage::BuyingTicket);
            return self.resume(now, sampler);
        }
        let Some(role) = self.stage.pool() else {
            return self.depart(now);
        };

        match self.phase {
            Phase::Request => {
                self.phase = Phase::Serve;
                Directive::Acquire(role)
            }
            Phase::Serve => {
                self.phase = Phase::Release;
                Directive::Hold(sampler.service_duration(role, &mut self.rng))
            }
            Phase::Release => {
                let next = match self.stage {
                    Stage::BuyingTicket => Stage::TicketChecked,
                    Stage::TicketChecked if sampler.buys_food(&mut self.rng) => Stage::BuysFood,
                    Stage::TicketChecked => Stage::SkipsFood,
                    _ => Stage::Done,
                };
                self.enter(next);
                Directive::Release(role)
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert!(stage > self.stage, "{} moved backwards", self.id);
        self.stage = stage;
        self.phase = Phase::Request;
    }

    fn depart(&mut self, now: SimTime) -> Directive {
        self.stage = Stage::Done;
        let departure = *self.departure.get_or_insert(now);
        Directive::Depart(departure - self.arrival)
    }
}
