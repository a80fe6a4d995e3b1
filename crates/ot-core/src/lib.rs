//! # ot-core
//!
//! Core types, error definitions, and settings for optree.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: type aliases, the error enum with its
//! early-return macros, and the process-wide [`Settings`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `unsupported!` / `not_applicable!` macros.
pub mod errors;

/// Global library settings (default numerical-strategy parameters).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices / step counts.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %), continuously compounded.
pub type Rate = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

/// A probability in [0, 1].
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{ScopedTruncationWidth, Settings};
