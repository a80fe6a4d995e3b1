//! Barrier types and the knock-out predicate applied at every lattice node.

use ot_core::{ensure, unsupported, Real, Result};
use std::fmt;

/// Barrier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarrierType {
    /// Expires when the asset falls to or below the barrier.
    DownAndOut,
    /// Expires when the asset rises to or above the barrier.
    UpAndOut,
    /// Becomes active when the asset falls to or below the barrier.
    DownAndIn,
    /// Becomes active when the asset rises to or above the barrier.
    UpAndIn,
    /// Expires when the asset touches either barrier.
    DoubleKnockOut,
    /// Becomes active when the asset touches either barrier.
    DoubleKnockIn,
}

impl BarrierType {
    /// `true` for the two single-barrier knock-out types.
    pub fn is_single_knock_out(self) -> bool {
        matches!(self, BarrierType::DownAndOut | BarrierType::UpAndOut)
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarrierType::DownAndOut => "down-and-out",
            BarrierType::UpAndOut => "up-and-out",
            BarrierType::DownAndIn => "down-and-in",
            BarrierType::UpAndIn => "up-and-in",
            BarrierType::DoubleKnockOut => "double knock-out",
            BarrierType::DoubleKnockIn => "double knock-in",
        };
        f.write_str(name)
    }
}

/// Decides whether an asset price lies at or beyond a knock-out barrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossBarrierChecker {
    /// Knocked out at or below the level.
    Lower(Real),
    /// Knocked out at or above the level.
    Upper(Real),
    /// Knocked out at or below `lower`, or at or above `upper`.
    Double {
        /// Lower barrier level.
        lower: Real,
        /// Upper barrier level.
        upper: Real,
    },
}

impl CrossBarrierChecker {
    /// Checker for a single barrier.
    ///
    /// Only knock-out types are accepted: knock-ins fail with
    /// [`Error::UnsupportedConfiguration`](ot_core::Error::UnsupportedConfiguration)
    /// and are priced by in-out parity instead, and double types need
    /// [`CrossBarrierChecker::for_double_barrier`].
    pub fn for_single_barrier(barrier_type: BarrierType, level: Real) -> Result<Self> {
        ensure!(
            level.is_finite() && level > 0.0,
            "barrier level must be finite and positive, got {level}"
        );
        match barrier_type {
            BarrierType::DownAndOut => Ok(CrossBarrierChecker::Lower(level)),
            BarrierType::UpAndOut => Ok(CrossBarrierChecker::Upper(level)),
            BarrierType::DownAndIn | BarrierType::UpAndIn => unsupported!(
                "{barrier_type} barriers are not priced on the lattice; \
                 use knock_in_from_parity with the matching knock-out"
            ),
            BarrierType::DoubleKnockOut | BarrierType::DoubleKnockIn => {
                unsupported!("{barrier_type} needs two levels; use a double-barrier option")
            }
        }
    }

    /// Checker for a double barrier. Only [`BarrierType::DoubleKnockOut`]
    /// is accepted.
    pub fn for_double_barrier(barrier_type: BarrierType, lower: Real, upper: Real) -> Result<Self> {
        ensure!(
            lower.is_finite() && lower > 0.0,
            "lower barrier must be finite and positive, got {lower}"
        );
        ensure!(
            upper.is_finite() && upper > lower,
            "upper barrier must be finite and above the lower barrier {lower}, got {upper}"
        );
        match barrier_type {
            BarrierType::DoubleKnockOut => Ok(CrossBarrierChecker::Double { lower, upper }),
            BarrierType::DoubleKnockIn => unsupported!(
                "{barrier_type} barriers are not priced on the lattice; \
                 use knock_in_from_parity with the matching knock-out"
            ),
            single => unsupported!("{single} is a single-barrier type"),
        }
    }

    /// `true` if a node at `asset_price` is knocked out.
    #[inline]
    pub fn crosses(&self, asset_price: Real) -> bool {
        match *self {
            CrossBarrierChecker::Lower(level) => asset_price <= level,
            CrossBarrierChecker::Upper(level) => asset_price >= level,
            CrossBarrierChecker::Double { lower, upper } => {
                asset_price <= lower || asset_price >= upper
            }
        }
    }

    /// `true` if the payoff can never be positive without first crossing the
    /// barrier: an up-and-out call struck at or above its barrier, or a
    /// down-and-out put struck at or below it.
    pub fn strike_behind_barrier(&self, strike: Real, sign: Real) -> bool {
        let is_call = sign > 0.0;
        match *self {
            CrossBarrierChecker::Lower(level) => !is_call && strike <= level,
            CrossBarrierChecker::Upper(level) => is_call && strike >= level,
            CrossBarrierChecker::Double { lower, upper } => {
                (is_call && strike >= upper) || (!is_call && strike <= lower)
            }
        }
    }

    /// Lower barrier level, if any.
    pub fn lower(&self) -> Option<Real> {
        match *self {
            CrossBarrierChecker::Lower(level) => Some(level),
            CrossBarrierChecker::Double { lower, .. } => Some(lower),
            CrossBarrierChecker::Upper(_) => None,
        }
    }

    /// Upper barrier level, if any.
    pub fn upper(&self) -> Option<Real> {
        match *self {
            CrossBarrierChecker::Upper(level) => Some(level),
            CrossBarrierChecker::Double { upper, .. } => Some(upper),
            CrossBarrierChecker::Lower(_) => None,
        }
    }
}
