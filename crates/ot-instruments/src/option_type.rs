//! Option type (call or put).

use ot_core::Real;
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// `true` for [`OptionType::Call`].
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Intrinsic value `max(φ(S − K), 0)`.
    #[inline]
    pub fn intrinsic(self, asset_price: Real, strike: Real) -> Real {
        (self.sign() * (asset_price - strike)).max(0.0)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}
