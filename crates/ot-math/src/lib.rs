//! # ot-math
//!
//! Mathematical collaborators of the lattice engine: the standard normal
//! distribution (delegating to `statrs` for the error function) and the
//! closed-form Black-Scholes price used by accelerated and truncated
//! American strategies.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Closed-form Black-Scholes-Merton pricing with a cost-of-carry term.
pub mod black_scholes;

/// Probability distributions.
pub mod distributions;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_scholes::black_scholes_price;
pub use distributions::{normal_cdf, normal_pdf};
