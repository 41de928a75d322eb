use crate::core::errors::{SimError, SimResult};
use crate::core::event_scheduler::EventScheduler;
use crate::core::resource_pool::{Grant, ResourcePool};
use crate::core::simulation_engine::{EventHandler, SimulationEngine};
use crate::core::types::{ProcessId, SimTime};
use log::{debug, trace};
use std::collections::HashMap;

use super::arrival::ArrivalGenerator;
use super::config::TheaterConfig;
use super::customer::{Customer, Directive, Stage};
use super::service::ServiceSampler;
use super::staffing::{CapacityTriple, PoolRole};
use super::{TheaterError, TheaterResult};

/// Events driving a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheaterEvent {
    /// The next customer walks in
    Arrival,
    /// A customer's hold finished, or a queued customer was handed a unit
    Resume(ProcessId),
}

/// Observer trait for trial events
///
/// Every method defaults to doing nothing.
pub trait TrialObserver {
    /// Called when simulated time advances
    fn on_time_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}

    /// Called when a customer is created
    fn on_arrival(&mut self, _customer: ProcessId, _time: SimTime) {}

    /// Called whenever a customer enters a new stage
    fn on_stage_change(&mut self, _customer: ProcessId, _stage: Stage, _time: SimTime) {}

    /// Called after every acquisition or release on a pool
    fn on_pool_update(&mut self, _role: PoolRole, _pool: &ResourcePool, _time: SimTime) {}

    /// Called when a customer leaves
    fn on_departure(&mut self, _customer: ProcessId, _arrival: SimTime, _departure: SimTime) {}
}

/// Observer that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrialObserver for NoopObserver {}

/// Outcome of one trial
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialResult {
    /// Time-in-system of every customer, in departure order (minutes)
    pub wait_times: Vec<f64>,
    /// Customers who went to the food counter
    pub food_buyers: usize,
}

impl TrialResult {
    pub fn customers(&self) -> usize {
        self.wait_times.len()
    }

    /// Mean time-in-system, `None` if nobody came
    pub fn mean_wait(&self) -> Option<f64> {
        if self.wait_times.is_empty() {
            return None;
        }
        Some(self.wait_times.iter().sum::<f64>() / self.wait_times.len() as f64)
    }
}

/// A theater with a fixed staffing level
///
/// Each trial builds fresh pools and random streams from its seed, so trials
/// are independent and can run on any thread.
#[derive(Debug, Clone)]
pub struct TheaterModel {
    staffing: CapacityTriple,
    config: TheaterConfig,
    sampler: ServiceSampler,
}

impl TheaterModel {
    pub fn new(staffing: CapacityTriple, config: TheaterConfig) -> TheaterResult<Self> {
        if !staffing.is_valid() {
            return Err(TheaterError::InvalidStaffing(staffing));
        }
        config.validate()?;
        let sampler = ServiceSampler::new(&config.service_times)?;
        Ok(Self {
            staffing,
            config,
            sampler,
        })
    }

    pub fn staffing(&self) -> CapacityTriple {
        self.staffing
    }

    /// Run one trial and return its mean wait in minutes
    pub fn mean_wait(&self, trial_seed: u64) -> TheaterResult<f64> {
        self.run_trial(trial_seed)?
            .mean_wait()
            .ok_or(TheaterError::EmptyTrial {
                horizon_minutes: self.config.horizon_minutes,
            })
    }

    pub fn run_trial(&self, trial_seed: u64) -> TheaterResult<TrialResult> {
        self.run_trial_observed(trial_seed, &mut NoopObserver)
    }

    /// Run one trial, reporting every step to `observer`
    pub fn run_trial_observed<O>(&self, trial_seed: u64, observer: &mut O) -> TheaterResult<TrialResult>
    where
        O: TrialObserver + ?Sized,
    {
        let horizon = SimTime::from_minutes(self.config.horizon_minutes);
        let mut trial = Trial {
            sampler: &self.sampler,
            arrivals: ArrivalGenerator::new(trial_seed, horizon),
            pools: [
                ResourcePool::new(PoolRole::Cashier.name(), self.staffing.cashiers)?,
                ResourcePool::new(PoolRole::Usher.name(), self.staffing.ushers)?,
                ResourcePool::new(PoolRole::Server.name(), self.staffing.servers)?,
            ],
            active: HashMap::new(),
            result: TrialResult::default(),
            observer,
        };

        let mut engine = SimulationEngine::new(None);
        if let Some(delay) = trial.arrivals.next_arrival(SimTime::ZERO, &self.sampler) {
            engine.schedule_initial_event(TheaterEvent::Arrival, delay)?;
        }
        let end = engine.run(&mut trial)?;

        let unfinished = trial.arrivals.spawned() - trial.result.customers() as u64;
        if unfinished > 0 {
            return Err(SimError::Stalled(unfinished as usize).into());
        }

        let [cashiers, ushers, servers] = &trial.pools;
        debug!(
            "trial {:#018x} [{}]: {} customers, mean wait {:.3} min, drained at {}, \
             peak busy {}/{}/{}, peak queues {}/{}/{}",
            trial_seed,
            self.staffing,
            trial.result.customers(),
            trial.result.mean_wait().unwrap_or(f64::NAN),
            end,
            cashiers.peak_held(),
            ushers.peak_held(),
            servers.peak_held(),
            cashiers.peak_waiting(),
            ushers.peak_waiting(),
            servers.peak_waiting(),
        );

        Ok(trial.result)
    }
}

/// Mutable state of one running trial
struct Trial<'a, O: ?Sized> {
    sampler: &'a ServiceSampler,
    arrivals: ArrivalGenerator,
    pools: [ResourcePool; 3],
    active: HashMap<ProcessId, Customer>,
    result: TrialResult,
    observer: &'a mut O,
}

impl<O: TrialObserver + ?Sized> Trial<'_, O> {
    /// Resume `id` and carry out its directives until it suspends or leaves
    fn drive(&mut self, id: ProcessId, scheduler: &mut EventScheduler<TheaterEvent>) -> SimResult<()> {
        let now = scheduler.now();
        loop {
            let customer = self.active.get_mut(&id).ok_or(SimError::UnknownProcess(id))?;
            let before = customer.stage();
            let directive = customer.resume(now, self.sampler);
            let stage = customer.stage();
            let arrival = customer.arrival();

            if stage != before {
                if stage == Stage::BuysFood {
                    self.result.food_buyers += 1;
                }
                self.observer.on_stage_change(id, stage, now);
            }

            match directive {
                Directive::Acquire(role) => {
                    let pool = &mut self.pools[role.index()];
                    let grant = pool.acquire(id);
                    self.observer.on_pool_update(role, pool, now);
                    if let Grant::Queued(position) = grant {
                        trace!("{} waits for a {} at position {}", id, role, position);
                        return Ok(());
                    }
                }
                Directive::Hold(minutes) => {
                    scheduler.schedule_event(TheaterEvent::Resume(id), minutes)?;
                    return Ok(());
                }
                Directive::Release(role) => {
                    let pool = &mut self.pools[role.index()];
                    if let Some(next) = pool.release()? {
                        scheduler.schedule_event(TheaterEvent::Resume(next), 0.0)?;
                    }
                    self.observer.on_pool_update(role, pool, now);
                }
                Directive::Depart(wait) => {
                    self.active.remove(&id);
                    self.result.wait_times.push(wait);
                    self.observer.on_departure(id, arrival, now);
                    return Ok(());
                }
            }
        }
    }
}

impl<O: TrialObserver + ?Sized> EventHandler for Trial<'_, O> {
    type Event = TheaterEvent;

    fn handle(&mut self, event: TheaterEvent, scheduler: &mut EventScheduler<TheaterEvent>) -> SimResult<()> {
        match event {
            TheaterEvent::Arrival => {
                let now = scheduler.now();
                let customer = self.arrivals.spawn(now);
                let id = customer.id();
                self.active.insert(id, customer);
                self.observer.on_arrival(id, now);
                self.drive(id, scheduler)?;

                if let Some(delay) = self.arrivals.next_arrival(now, self.sampler) {
                    scheduler.schedule_event(TheaterEvent::Arrival, delay)?;
                }
                Ok(())
            }
            TheaterEvent::Resume(id) => self.drive(id, scheduler),
        }
    }

    fn on_time_advance(&mut self, old_time: SimTime, new_time: SimTime) {
        self.observer.on_time_advance(old_time, new_time);
    }
}
