pub mod atomic_metrics;
pub mod attempt_store;
pub mod attempt_tracker;
pub mod clock;
pub mod gateway;
pub mod identity;
pub mod normalizer;
pub mod payment_service;
