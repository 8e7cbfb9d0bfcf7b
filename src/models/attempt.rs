use serde::Serialize;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
pub const DEFAULT_TIME_WINDOW_SECS: u64 = 3600;

/// One transaction attempt made from a client IP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptRecord {
    /// Seconds since the Unix epoch, fractional.
    pub timestamp: f64,
    pub transaction_id: String,
    pub amount_cents: u64,
}

/// Outcome of recording an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptDecision {
    pub allowed: bool,
    pub message: String,
}

impl AttemptDecision {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            message: "Transação permitida".to_string(),
        }
    }
}

/// Answer to a ban query for one IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanStatus {
    pub ip: String,
    pub banned: bool,
    pub recent_attempts: usize,
    pub max_attempts: usize,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptLimits {
    pub max_attempts: usize,
    pub window_secs: u64,
}

impl Default for AttemptLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window_secs: DEFAULT_TIME_WINDOW_SECS,
        }
    }
}
