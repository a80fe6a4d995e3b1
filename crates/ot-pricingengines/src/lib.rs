//! # ot-pricingengines
//!
//! Tree pricing models: binomial and trinomial backward induction over a
//! [`LatticeSpecification`](ot_methods::LatticeSpecification), with
//! finite-difference Greeks read off the first two layers.
//!
//! ## Models
//!
//! - [`BinomialTreeOptionPricingModel`]: one-asset contracts with a flat or
//!   time-varying market and optional discrete dividends, plus two-asset
//!   contracts on the four-branch tree
//! - [`TrinomialTreeOptionPricingModel`]: the same one-asset entry points on
//!   three-branch lattices
//!
//! Both models emit `tracing` events (`debug` per pricing call, `trace`
//! when a barrier short-circuits the lattice); installing a subscriber is
//! left to the application.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binomial_tree_engine;
pub mod greeks;
pub mod market;
mod rollback;
pub mod trinomial_tree_engine;

pub use binomial_tree_engine::BinomialTreeOptionPricingModel;
pub use greeks::{central_delta, central_gamma, cross_gamma, TreeGreeks, TwoAssetGreeks};
pub use market::{MarketSnapshot, TimeVaryingMarket, TwoAssetMarket};
pub use trinomial_tree_engine::TrinomialTreeOptionPricingModel;
