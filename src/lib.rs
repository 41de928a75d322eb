pub mod core;
pub mod theater;

// Re-export commonly used types
pub use crate::core::errors::{SimError, SimResult};
pub use crate::core::types::{ProcessId, SimTime};
pub use crate::theater::{
    BestConfig, CapacityTriple, Experiment, ExperimentConfig, TheaterConfig, TheaterError,
    TheaterModel, TheaterResult,
};
