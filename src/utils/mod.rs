pub mod digits;
pub mod masking;
pub mod money;
