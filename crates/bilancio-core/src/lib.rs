pub mod annualize;
pub mod error;
pub mod indicators;
pub mod reclassify;
pub mod reference;
pub mod statements;
pub mod types;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "crisis")]
pub mod crisis;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::BilancioError;
pub use types::*;

/// Standard result type for all bilancio operations
pub type BilancioResult<T> = Result<T, BilancioError>;
