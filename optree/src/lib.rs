//! # optree
//!
//! Binomial and trinomial lattice pricing for European, American and
//! Bermudan options, barrier and exotic payoffs, discrete dividends and
//! two-asset contracts, with Greeks read off the tree.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ot-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! optree = "0.1"
//! ```
//!
//! ```rust
//! use approx::assert_abs_diff_eq;
//! use optree::instruments::{EuropeanVanillaOption, OptionType};
//! use optree::methods::CoxRossRubinstein;
//! use optree::pricingengines::BinomialTreeOptionPricingModel;
//!
//! # fn main() -> optree::core::Result<()> {
//! let call = EuropeanVanillaOption::new(100.0, 1.0, 500, OptionType::Call)?;
//! let price = BinomialTreeOptionPricingModel
//!     .price(&CoxRossRubinstein, &call, 100.0, 0.2, 0.05, 0.0)?;
//! assert_abs_diff_eq!(price, 10.4506, epsilon = 1e-2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, errors and global settings.
pub use ot_core as core;

/// Normal distribution and the Black-Scholes reference formula.
pub use ot_math as math;

/// Payoff providers: vanilla, barrier, exotic and two-asset contracts.
pub use ot_instruments as instruments;

/// Lattice specifications and discrete dividend schedules.
pub use ot_methods as methods;

/// Binomial and trinomial tree pricing models.
pub use ot_pricingengines as pricingengines;
