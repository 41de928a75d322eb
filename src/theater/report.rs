use std::fmt;

/// A duration rounded to whole minutes and seconds for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl WaitTime {
    /// Round `minutes` to the nearest second; 59.6 s carries into the next minute
    pub fn from_minutes(minutes: f64) -> Self {
        let total_secs = (minutes.max(0.0) * 60.0).round() as u64;
        Self {
            minutes: total_secs / 60,
            seconds: total_secs % 60,
        }
    }
}

impl fmt::Display for WaitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes and {} seconds", self.minutes, self.seconds)
    }
}
