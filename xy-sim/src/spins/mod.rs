pub mod correlation;
pub mod field;

pub use correlation::spin_correlation;
pub use field::SpinField;
