use crate::core::rng::derive_seed;
use log::{debug, info, trace};
use rayon::prelude::*;
use std::fmt;

use super::config::ExperimentConfig;
use super::model::TheaterModel;
use super::report::WaitTime;
use super::staffing::CapacityTriple;
use super::{TheaterError, TheaterResult};

/// Lowest-wait staffing found by a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestConfig {
    pub staffing: CapacityTriple,
    /// Mean over trials of each trial's mean time-in-system (minutes)
    pub mean_wait_minutes: f64,
}

impl BestConfig {
    pub fn wait_time(&self) -> WaitTime {
        WaitTime::from_minutes(self.mean_wait_minutes)
    }
}

impl fmt::Display for BestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The best average wait time is {}, with {}",
            self.wait_time(),
            self.staffing
        )
    }
}

/// Sweep over every staffing level that fits the employee budget
///
/// Trial `k` of every configuration uses the same seed, so configurations
/// are compared on identical customer streams.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> TheaterResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Seed for the `trial`-th trial of any configuration
    pub fn trial_seed(&self, trial: usize) -> u64 {
        derive_seed(self.config.seed, trial as u64)
    }

    /// Staffing levels to simulate, in evaluation order
    pub fn candidates(&self) -> Vec<CapacityTriple> {
        CapacityTriple::candidates(self.config.max_employees)
            .filter(|staffing| {
                let valid = staffing.is_valid();
                if !valid {
                    trace!("skipping ({}): every pool needs an employee", staffing);
                }
                valid
            })
            .collect()
    }

    /// Mean wait of `staffing` averaged over its trials (minutes)
    ///
    /// Trials in which nobody arrived before the horizon are left out of the
    /// average. Fails with [`TheaterError::EmptyTrial`] only if every trial
    /// was empty.
    pub fn evaluate(&self, staffing: CapacityTriple) -> TheaterResult<f64> {
        let model = TheaterModel::new(staffing, self.config.theater.clone())?;
        let trials = self.config.trials_per_config;

        let mut total = 0.0;
        let mut counted = 0usize;
        for trial in 0..trials {
            match model.run_trial(self.trial_seed(trial))?.mean_wait() {
                Some(mean) => {
                    total += mean;
                    counted += 1;
                }
                None => trace!("({}): trial {} had no customers", staffing, trial),
            }
        }
        if counted == 0 {
            return Err(TheaterError::EmptyTrial {
                horizon_minutes: self.config.theater.horizon_minutes,
            });
        }
        let mean = total / counted as f64;

        debug!(
            "({}): mean wait {:.3} min over {} of {} trials",
            staffing, mean, counted, trials
        );
        Ok(mean)
    }

    /// Evaluate every candidate and return the best one
    ///
    /// Ties keep the configuration evaluated first.
    pub fn run(&self) -> TheaterResult<BestConfig> {
        let candidates = self.candidates();
        info!(
            "Evaluating {} staffing configurations ({} trials each, {:?} mode)",
            candidates.len(),
            self.config.trials_per_config,
            self.config.execution.concurrency_mode
        );

        let scores: Vec<f64> = match self.config.execution.build_thread_pool()? {
            Some(pool) => pool.install(|| {
                candidates
                    .par_iter()
                    .map(|&staffing| self.evaluate(staffing))
                    .collect::<TheaterResult<Vec<_>>>()
            })?,
            None => candidates
                .iter()
                .map(|&staffing| self.evaluate(staffing))
                .collect::<TheaterResult<Vec<_>>>()?,
        };

        let mut best: Option<BestConfig> = None;
        for (staffing, mean_wait_minutes) in candidates.into_iter().zip(scores) {
            if best.map_or(true, |b| mean_wait_minutes < b.mean_wait_minutes) {
                debug!("new best ({}): {:.3} min", staffing, mean_wait_minutes);
                best = Some(BestConfig {
                    staffing,
                    mean_wait_minutes,
                });
            }
        }

        let best = best.ok_or_else(|| {
            TheaterError::InvalidConfig(format!(
                "no staffing fits {} employees",
                self.config.max_employees
            ))
        })?;
        info!("Best staffing ({}) waits {:.3} min", best.staffing, best.mean_wait_minutes);
        Ok(best)
    }
}
