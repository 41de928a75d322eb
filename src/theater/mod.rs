//! Movie theater staffing model
//!
//! Customers buy a ticket from a cashier, have it checked by an usher and
//! may stop at the food counter. [`TheaterModel`] runs one staffing level,
//! [`Experiment`] sweeps every staffing level under an employee budget.

pub mod arrival;
pub mod config;
pub mod customer;
pub mod experiment;
pub mod model;
pub mod report;
pub mod service;
pub mod staffing;

use crate::core::errors::SimError;
use thiserror::Error;

pub use config::{ExperimentConfig, ServiceTimes, TheaterConfig};
pub use customer::{Customer, Directive, Stage};
pub use experiment::{BestConfig, Experiment};
pub use model::{NoopObserver, TheaterModel, TrialObserver, TrialResult};
pub use report::WaitTime;
pub use staffing::{CapacityTriple, PoolRole};

#[derive(Debug, Error)]
pub enum TheaterError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid {what} distribution: {reason}")]
    Distribution { what: &'static str, reason: String },

    #[error("staffing ({0}) leaves a pool without employees")]
    InvalidStaffing(CapacityTriple),

    #[error("no customer arrived within the {horizon_minutes}-minute horizon")]
    EmptyTrial { horizon_minutes: f64 },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Sim(#[from] SimError),
}

pub type TheaterResult<T> = Result<T, TheaterError>;
