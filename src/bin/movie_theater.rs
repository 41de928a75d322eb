use cinesim::core::execution::{ConcurrencyMode, SimulationConfig};
use cinesim::theater::{BestConfig, CapacityTriple, Experiment, ExperimentConfig};
use clap::Parser;
use std::path::PathBuf;

/// Find the movie theater staffing with the shortest average customer wait
#[derive(Debug, Parser)]
#[command(name = "movie_theater")]
struct Args {
    /// JSON experiment configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upper bound on cashiers + servers + ushers
    #[arg(long)]
    max_employees: Option<usize>,

    /// Trials averaged per staffing configuration
    #[arg(long)]
    trials: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Simulated minutes during which customers keep arriving
    #[arg(long)]
    horizon_minutes: Option<f64>,

    /// Evaluate configurations in parallel
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel mode (implies --parallel)
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluate a single staffing level instead of sweeping
    #[arg(long, requires_all = ["servers", "ushers"])]
    cashiers: Option<usize>,

    #[arg(long, requires_all = ["cashiers", "ushers"])]
    servers: Option<usize>,

    #[arg(long, requires_all = ["cashiers", "servers"])]
    ushers: Option<usize>,
}

impl Args {
    fn experiment_config(&self) -> Result<ExperimentConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => ExperimentConfig::default(),
        };

        if let Some(max_employees) = self.max_employees {
            config.max_employees = max_employees;
        }
        if let Some(trials) = self.trials {
            config.trials_per_config = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(horizon) = self.horizon_minutes {
            config.theater.horizon_minutes = horizon;
        }
        if self.parallel || self.threads.is_some() {
            let mut execution = SimulationConfig::new().with_concurrency(ConcurrencyMode::Rayon);
            if let Some(threads) = self.threads {
                execution = execution.with_thread_pool_size(threads);
            }
            config.execution = execution;
        }
        Ok(config)
    }

    fn fixed_staffing(&self) -> Option<CapacityTriple> {
        match (self.cashiers, self.servers, self.ushers) {
            (Some(cashiers), Some(servers), Some(ushers)) => {
                Some(CapacityTriple::new(cashiers, ushers, servers))
            }
            _ => None,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let experiment = Experiment::new(args.experiment_config()?)?;

    let best = match args.fixed_staffing() {
        Some(staffing) => BestConfig {
            staffing,
            mean_wait_minutes: experiment.evaluate(staffing)?,
        },
        None => experiment.run()?,
    };

    println!("{}", best);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_staffing_maps_each_flag_to_its_pool() {
        let args = Args::try_parse_from([
            "movie_theater",
            "--cashiers",
            "7",
            "--servers",
            "5",
            "--ushers",
            "2",
        ])
        .unwrap();
        let staffing = args.fixed_staffing().unwrap();
        assert_eq!(staffing.cashiers, 7);
        assert_eq!(staffing.servers, 5);
        assert_eq!(staffing.ushers, 2);
    }

    #[test]
    fn test_fixed_staffing_needs_all_three_flags() {
        assert!(Args::try_parse_from(["movie_theater", "--cashiers", "3"]).is_err());

        let args = Args::try_parse_from(["movie_theater"]).unwrap();
        assert_eq!(args.fixed_staffing(), None);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "movie_theater",
            "--max-employees",
            "9",
            "--trials",
            "4",
            "--threads",
            "2",
        ])
        .unwrap();
        let config = args.experiment_config().unwrap();
        assert_eq!(config.max_employees, 9);
        assert_eq!(config.trials_per_config, 4);
        assert_eq!(config.execution.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.execution.thread_pool_size, Some(2));
    }
}
