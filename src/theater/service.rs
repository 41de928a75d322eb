use crate::core::rng::SimRng;
use rand_distr::{Bernoulli, Normal, Uniform};

use super::config::ServiceTimes;
use super::staffing::PoolRole;
use super::{TheaterError, TheaterResult};

const SECS_PER_MINUTE: f64 = 60.0;

/// Pre-built distributions for every random draw a trial makes
///
/// All durations come out in simulated minutes.
#[derive(Debug, Clone)]
pub struct ServiceSampler {
    inter_arrival: Normal<f64>,
    ticket_sale: Uniform<f64>,
    ticket_check: Normal<f64>,
    food_sale: Uniform<f64>,
    food_choice: Bernoulli,
}

impl ServiceSampler {
    /// Validate `times` and build the distributions
    pub fn new(times: &ServiceTimes) -> TheaterResult<Self> {
        times.validate()?;

        let inter_arrival = Normal::new(
            times.arrival_mean_secs / SECS_PER_MINUTE,
            times.arrival_std_dev_secs / SECS_PER_MINUTE,
        )
        .map_err(|e| distribution_error("inter-arrival", e))?;
        let ticket_check = Normal::new(
            times.check_mean_secs / SECS_PER_MINUTE,
            times.check_std_dev_secs / SECS_PER_MINUTE,
        )
        .map_err(|e| distribution_error("ticket check", e))?;
        let food_choice = Bernoulli::new(times.food_probability)
            .map_err(|e| distribution_error("food choice", e))?;

        Ok(Self {
            inter_arrival,
            ticket_sale: Uniform::new_inclusive(times.ticket_min_minutes, times.ticket_max_minutes),
            ticket_check,
            food_sale: Uniform::new_inclusive(times.food_min_minutes, times.food_max_minutes),
            food_choice,
        })
    }

    /// Minutes until the next customer shows up
    pub fn inter_arrival(&self, rng: &mut SimRng) -> f64 {
        rng.sample_non_negative(&self.inter_arrival)
    }

    /// Minutes a unit of `role` is held for one customer
    pub fn service_duration(&self, role: PoolRole, rng: &mut SimRng) -> f64 {
        match role {
            PoolRole::Cashier => rng.sample(&self.ticket_sale),
            PoolRole::Usher => rng.sample_non_negative(&self.ticket_check),
            PoolRole::Server => rng.sample(&self.food_sale),
        }
    }

    /// Whether a customer stops for food
    pub fn buys_food(&self, rng: &mut SimRng) -> bool {
        rng.sample(&self.food_choice)
    }
}

fn distribution_error(what: &'static str, err: impl std::fmt::Display) -> TheaterError {
    TheaterError::Distribution {
        what,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_stay_in_range() {
        let sampler = ServiceSampler::new(&ServiceTimes::default()).unwrap();
        let mut rng = SimRng::new(3);
        for _ in 0..2_000 {
            let ticket = sampler.service_duration(PoolRole::Cashier, &mut rng);
            assert!((1.0..=3.0).contains(&ticket));
            let food = sampler.service_duration(PoolRole::Server, &mut rng);
            assert!((1.0..=5.0).contains(&food));
            assert!(sampler.service_duration(PoolRole::Usher, &mut rng) >= 0.0);
            assert!(sampler.inter_arrival(&mut rng) >= 0.0);
        }
    }

    #[test]
    fn test_inter_arrival_mean_is_twelve_seconds() {
        let sampler = ServiceSampler::new(&ServiceTimes::default()).unwrap();
        let mut rng = SimRng::new(11);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| sampler.inter_arrival(&mut rng)).sum();
        let mean_secs = total / n as f64 * SECS_PER_MINUTE;
        // Re-sampling the small negative tail nudges the mean slightly upward
        assert!((11.7..12.5).contains(&mean_secs), "mean was {}", mean_secs);
    }

    #[test]
    fn test_certain_food_choice() {
        let times = ServiceTimes {
            food_probability: 1.0,
            ..ServiceTimes::default()
        };
        let sampler = ServiceSampler::new(&times).unwrap();
        let mut rng = SimRng::new(5);
        assert!((0..100).all(|_| sampler.buys_food(&mut rng)));
    }

    #[test]
    fn test_invalid_times_rejected() {
        let times = ServiceTimes {
            ticket_min_minutes: 4.0,
            ..ServiceTimes::default()
        };
        assert!(ServiceSampler::new(&times).is_err());
    }
}
