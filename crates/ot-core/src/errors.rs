//! Error types for optree.
//!
//! Every failure the pricing stack can report is one of three kinds: a
//! rejected input, a combination the library deliberately does not support,
//! or an accessor queried on a contract where it carries no meaning. The
//! `ensure!`, `unsupported!` and `not_applicable!` macros return early with
//! the matching variant.

use thiserror::Error;

/// The top-level error type used throughout optree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input failed validation (non-finite or out-of-range values,
    /// inconsistent schedules, probabilities outside (0, 1), ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested combination of lattice, contract and model is not
    /// implemented, e.g. trinomial parameters from a binomial-only lattice.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// An accessor was queried on a contract for which it is undefined,
    /// e.g. the strike of an exchange option.
    #[error("not applicable: {0}")]
    NotApplicable(String),
}

/// Shorthand `Result` type used throughout optree.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Validation(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ot_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ot_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Validation(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Validation(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::UnsupportedConfiguration(...))` immediately.
///
/// # Example
/// ```
/// use ot_core::{unsupported, errors::Error};
/// fn trinomial_only() -> ot_core::errors::Result<()> {
///     unsupported!("binomial parameters are not available");
/// }
/// assert!(matches!(trinomial_only(), Err(Error::UnsupportedConfiguration(_))));
/// ```
#[macro_export]
macro_rules! unsupported {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::UnsupportedConfiguration(format!($($msg)*)))
    };
}

/// Returns `Err(Error::NotApplicable(...))` immediately.
///
/// # Example
/// ```
/// use ot_core::{not_applicable, errors::Error};
/// fn strike() -> ot_core::errors::Result<f64> {
///     not_applicable!("exchange options have no strike");
/// }
/// assert!(matches!(strike(), Err(Error::NotApplicable(_))));
/// ```
#[macro_export]
macro_rules! not_applicable {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::NotApplicable(format!($($msg)*)))
    };
}
