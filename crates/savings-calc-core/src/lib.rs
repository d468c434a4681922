pub mod display;
pub mod error;
pub mod interest;
pub mod session;
pub mod types;

pub use error::SavingsCalcError;
pub use types::*;

/// Standard result type for all savings-calc operations
pub type SavingsCalcResult<T> = Result<T, SavingsCalcError>;
