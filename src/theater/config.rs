use crate::core::execution::SimulationConfig;
use serde::{Deserialize, Serialize};

use super::{TheaterError, TheaterResult};

/// Service and arrival time parameters
///
/// Inter-arrival and ticket-check times are normal distributions given in
/// seconds; negative draws are re-sampled. Ticket and food sales are uniform
/// ranges given in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTimes {
    pub arrival_mean_secs: f64,
    pub arrival_std_dev_secs: f64,
    pub ticket_min_minutes: f64,
    pub ticket_max_minutes: f64,
    pub check_mean_secs: f64,
    pub check_std_dev_secs: f64,
    pub food_min_minutes: f64,
    pub food_max_minutes: f64,
    /// Chance that a customer stops at the food counter
    pub food_probability: f64,
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            arrival_mean_secs: 12.0,
            arrival_std_dev_secs: 5.0,
            ticket_min_minutes: 1.0,
            ticket_max_minutes: 3.0,
            check_mean_secs: 3.0,
            check_std_dev_secs: 1.0,
            food_min_minutes: 1.0,
            food_max_minutes: 5.0,
            food_probability: 0.5,
        }
    }
}

impl ServiceTimes {
    pub fn validate(&self) -> TheaterResult<()> {
        check_normal("inter-arrival", self.arrival_mean_secs, self.arrival_std_dev_secs)?;
        if self.arrival_mean_secs <= 0.0 {
            return Err(TheaterError::InvalidConfig(
                "mean inter-arrival time must be greater than 0".to_string(),
            ));
        }
        check_range("ticket sale", self.ticket_min_minutes, self.ticket_max_minutes)?;
        if self.ticket_min_minutes <= 0.0 {
            return Err(TheaterError::InvalidConfig(
                "ticket sale must take some time".to_string(),
            ));
        }
        check_normal("ticket check", self.check_mean_secs, self.check_std_dev_secs)?;
        check_range("food sale", self.food_min_minutes, self.food_max_minutes)?;

        if !(0.0..=1.0).contains(&self.food_probability) {
            return Err(TheaterError::InvalidConfig(format!(
                "food probability must be within [0, 1], got {}",
                self.food_probability
            )));
        }
        Ok(())
    }
}

fn check_normal(what: &'static str, mean: f64, std_dev: f64) -> TheaterResult<()> {
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(TheaterError::InvalidConfig(format!(
            "{} needs a finite mean and non-negative standard deviation, got ({}, {})",
            what, mean, std_dev
        )));
    }
    Ok(())
}

fn check_range(what: &'static str, min: f64, max: f64) -> TheaterResult<()> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(TheaterError::InvalidConfig(format!(
            "{} needs 0 <= min <= max, got [{}, {}]",
            what, min, max
        )));
    }
    Ok(())
}

/// Configuration of a single trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheaterConfig {
    /// Customers keep arriving until this many simulated minutes have passed
    pub horizon_minutes: f64,
    pub service_times: ServiceTimes,
}

impl Default for TheaterConfig {
    fn default() -> Self {
        Self {
            horizon_minutes: 50.0,
            service_times: ServiceTimes::default(),
        }
    }
}

impl TheaterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizon(mut self, minutes: f64) -> Self {
        self.horizon_minutes = minutes;
        self
    }

    pub fn with_service_times(mut self, service_times: ServiceTimes) -> Self {
        self.service_times = service_times;
        self
    }

    pub fn with_food_probability(mut self, probability: f64) -> Self {
        self.service_times.food_probability = probability;
        self
    }

    pub fn validate(&self) -> TheaterResult<()> {
        if !self.horizon_minutes.is_finite() || self.horizon_minutes <= 0.0 {
            return Err(TheaterError::InvalidConfig(format!(
                "horizon must be a positive number of minutes, got {}",
                self.horizon_minutes
            )));
        }
        self.service_times.validate()
    }
}

/// Configuration of a full staffing sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Upper bound on cashiers + ushers + servers
    pub max_employees: usize,
    /// Trials averaged for every staffing configuration
    pub trials_per_config: usize,
    /// Master seed; the same seed always produces identical results
    pub seed: u64,
    pub theater: TheaterConfig,
    pub execution: SimulationConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            max_employees: 25,
            trials_per_config: 50,
            seed: 42,
            theater: TheaterConfig::default(),
            execution: SimulationConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_employees(mut self, max_employees: usize) -> Self {
        self.max_employees = max_employees;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials_per_config = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_theater(mut self, theater: TheaterConfig) -> Self {
        self.theater = theater;
        self
    }

    pub fn with_execution(mut self, execution: SimulationConfig) -> Self {
        self.execution = execution;
        self
    }

    pub fn validate(&self) -> TheaterResult<()> {
        if self.max_employees < 3 {
            return Err(TheaterError::InvalidConfig(format!(
                "need at least 3 employees (one per pool), got {}",
                self.max_employees
            )));
        }

        if self.trials_per_config == 0 {
            return Err(TheaterError::InvalidConfig(
                "trials per configuration must be at least 1".to_string(),
            ));
        }

        if self.execution.thread_pool_size == Some(0) {
            return Err(TheaterError::InvalidConfig(
                "thread pool size must be at least 1".to_string(),
            ));
        }

        self.theater.validate()
    }
}
