use super::types::ProcessId;
use thiserror::Error;

/// Faults raised by the scheduler, engine and resource pools
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("delay must be finite and non-negative, got {0}")]
    InvalidDelay(f64),

    #[error("pool '{pool}' released a unit it did not hold")]
    ReleaseWithoutHold { pool: &'static str },

    #[error("pool '{pool}' must have a capacity of at least 1")]
    ZeroCapacity { pool: &'static str },

    #[error("process {0} is not known to the simulation")]
    UnknownProcess(ProcessId),

    #[error("{0} processes were still active when the event queue drained")]
    Stalled(usize),
}

pub type SimResult<T> = Result<T, SimError>;
