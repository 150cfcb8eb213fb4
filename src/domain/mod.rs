//! Domain layer: the allocation engine and currency formatting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod currency;
pub mod error;
pub mod split;

pub use currency::{format_amount, Currency};
pub use error::DomainError;
pub use split::{Share, Split, FULL_PERCENTAGE, SUM_TOLERANCE};
