pub mod errors;
pub mod event_scheduler;
pub mod execution;
pub mod resource_pool;
pub mod rng;
pub mod simulation_engine;
pub mod types;

#[cfg(test)]
mod tests;
