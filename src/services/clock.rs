use chrono::{DateTime, Utc};

/// Source of "now" for everything that stamps or windows by time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Fractional seconds since the Unix epoch.
    fn epoch_secs(&self) -> f64 {
        self.now().timestamp_micros() as f64 / 1_000_000.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
