//! # ot-methods
//!
//! Numerical building blocks of the tree pricers.
//!
//! # Modules
//!
//! * [`lattice`] — the [`LatticeSpecification`] trait and its nine schemes
//! * [`dividends`] — cash and proportional discrete dividend adjustments

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Discrete dividend schedules and their lattice corrections.
pub mod dividends;

/// Lattice discretization schemes.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use dividends::{CashDividends, DividendFunctionProvider, DividendSchedule, ProportionalDividends};
pub use lattice::{
    finite_difference_theta, pde_theta, Adaptive, BinomialParameters, CoxRossRubinstein, Flexible,
    JabbourKraminYoung, JarrowRudd, LatticeInputs, LatticeSpecification, LeisenReimer,
    ThetaInputs, Tian, TimeVarying, TimeVaryingParameters, TimeVaryingStep, TrinomialParameters,
    Trigeorgis,
};
