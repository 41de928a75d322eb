//! Configuration for how independent trials are executed
//!
//! Trials never share state, so they can be spread over a Rayon pool
//! without changing results.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Every configuration is evaluated in order on the calling thread
    #[default]
    Sequential,
    /// Configurations are evaluated concurrently on a Rayon pool
    Rayon,
}

/// Configuration for simulation execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the thread pool for parallel execution
    /// Only relevant when concurrency_mode is Rayon; `None` uses all cores
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Default configuration uses Sequential mode with no thread pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency mode for the simulation
    ///
    /// # Arguments
    /// * `mode` - The concurrency mode to use
    ///
    /// # Returns
    /// A new configuration with the specified concurrency mode
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Arguments
    /// * `size` - The number of threads to use in the thread pool
    ///
    /// # Returns
    /// A new configuration with the specified thread pool size
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Build a dedicated pool for Rayon mode
    ///
    /// # Returns
    /// `None` in Sequential mode, otherwise a pool sized by `thread_pool_size`
    pub fn build_thread_pool(&self) -> Result<Option<ThreadPool>, ThreadPoolBuildError> {
        match self.concurrency_mode {
            ConcurrencyMode::Sequential => Ok(None),
            ConcurrencyMode::Rayon => {
                let mut builder = ThreadPoolBuilder::new();
                if let Some(size) = self.thread_pool_size {
                    builder = builder.num_threads(size);
                }
                builder.build().map(Some)
            }
        }
    }
}
