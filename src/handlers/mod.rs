pub mod attempts;
pub mod client_ip;
pub mod health;
pub mod metrics;
pub mod payments;
