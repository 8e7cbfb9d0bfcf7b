pub mod attempt;
pub mod payment;
