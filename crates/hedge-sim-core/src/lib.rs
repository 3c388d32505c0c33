pub mod error;
pub mod format;
pub mod types;

#[cfg(feature = "engine")]
pub mod hedge;

pub use error::HedgeSimError;
pub use types::*;

/// Standard result type for all hedge-sim operations
pub type HedgeSimResult<T> = Result<T, HedgeSimError>;
