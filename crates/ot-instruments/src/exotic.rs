//! European exotic payoffs on one asset.
//!
//! Every contract here uses the default discounted-expectation recursion;
//! only the terminal payoff differs.

use ot_core::{ensure, not_applicable, Real, Result, Size, Time};

use crate::function_provider::{ContractTerms, OptionFunctionProvider1D};
use crate::option_type::OptionType;

/// `max(φ(S − K), 0)^p`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoweredOption {
    terms: ContractTerms,
    power: Real,
}

impl PoweredOption {
    /// Create a powered option with exponent `power > 0`.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType, power: Real) -> Result<Self> {
        ensure!(power.is_finite() && power > 0.0, "power must be finite and positive, got {power}");
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)?, power })
    }

    /// Exponent applied to the vanilla payoff.
    pub fn power(&self) -> Real {
        self.power
    }
}

impl OptionFunctionProvider1D for PoweredOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.terms
            .option_type()
            .intrinsic(asset_price, self.terms.strike())
            .powf(self.power)
    }
}

/// `min(max(φ(S^p − K), 0), cap)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CappedPowerOption {
    terms: ContractTerms,
    power: Real,
    cap: Real,
}

impl CappedPowerOption {
    /// Create a capped power option.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        power: Real,
        cap: Real,
    ) -> Result<Self> {
        ensure!(power.is_finite() && power > 0.0, "power must be finite and positive, got {power}");
        ensure!(cap.is_finite() && cap > 0.0, "cap must be finite and positive, got {cap}");
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)?, power, cap })
    }
}

impl OptionFunctionProvider1D for CappedPowerOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.terms
            .option_type()
            .intrinsic(asset_price.powf(self.power), self.terms.strike())
            .min(self.cap)
    }
}

/// Pays `φ(S − K_payoff)` whenever `φ(S − K_trigger) > 0`; the payoff may
/// be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct GapOption {
    terms: ContractTerms,
    payoff_strike: Real,
}

impl GapOption {
    /// Create a gap option; `strike` is the trigger.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        payoff_strike: Real,
    ) -> Result<Self> {
        ensure!(
            payoff_strike.is_finite() && payoff_strike > 0.0,
            "payoff strike must be finite and positive, got {payoff_strike}"
        );
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)?, payoff_strike })
    }

    /// Strike the payoff is measured from.
    pub fn payoff_strike(&self) -> Real {
        self.payoff_strike
    }
}

impl OptionFunctionProvider1D for GapOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        let sign = self.terms.option_type().sign();
        if sign * (asset_price - self.terms.strike()) > 0.0 {
            sign * (asset_price - self.payoff_strike)
        } else {
            0.0
        }
    }
}

/// `max(ln(S/K), 0)`. There is no put variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LogOption {
    terms: ContractTerms,
}

impl LogOption {
    /// Create a log option.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size) -> Result<Self> {
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, OptionType::Call)? })
    }
}

impl OptionFunctionProvider1D for LogOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn sign(&self) -> Result<Real> {
        not_applicable!("a log option has no call/put sign")
    }

    fn payoff(&self, asset_price: Real) -> Real {
        (asset_price / self.terms.strike()).ln().max(0.0)
    }
}

/// Pays `S / K_L` when `K_L ≤ S < K_H`.
#[derive(Debug, Clone, PartialEq)]
pub struct SupershareOption {
    terms: ContractTerms,
    upper_bound: Real,
}

impl SupershareOption {
    /// Create a supershare with lower bound `strike` and upper bound
    /// `upper_bound > strike`.
    pub fn new(strike: Real, upper_bound: Real, time_to_expiry: Time, steps: Size) -> Result<Self> {
        let terms = ContractTerms::new(strike, time_to_expiry, steps, OptionType::Call)?;
        ensure!(
            upper_bound.is_finite() && upper_bound > strike,
            "upper bound must be finite and above the lower bound {strike}, got {upper_bound}"
        );
        Ok(Self { terms, upper_bound })
    }

    /// Upper bound `K_H`.
    pub fn upper_bound(&self) -> Real {
        self.upper_bound
    }
}

impl OptionFunctionProvider1D for SupershareOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn sign(&self) -> Result<Real> {
        not_applicable!("a supershare option has no call/put sign")
    }

    fn payoff(&self, asset_price: Real) -> Real {
        let lower = self.terms.strike();
        if (lower..self.upper_bound).contains(&asset_price) {
            asset_price / lower
        } else {
            0.0
        }
    }
}

/// Pays a fixed amount when `φ(S − K) > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CashOrNothingOption {
    terms: ContractTerms,
    cash: Real,
}

impl CashOrNothingOption {
    /// Create a cash-or-nothing digital paying `cash`.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType, cash: Real) -> Result<Self> {
        ensure!(cash.is_finite() && cash > 0.0, "cash amount must be finite and positive, got {cash}");
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)?, cash })
    }
}

impl OptionFunctionProvider1D for CashOrNothingOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        if self.terms.option_type().sign() * (asset_price - self.terms.strike()) > 0.0 {
            self.cash
        } else {
            0.0
        }
    }
}

/// Pays the asset when `φ(S − K) > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOrNothingOption {
    terms: ContractTerms,
}

impl AssetOrNothingOption {
    /// Create an asset-or-nothing digital.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)? })
    }
}

impl OptionFunctionProvider1D for AssetOrNothingOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        if self.terms.option_type().sign() * (asset_price - self.terms.strike()) > 0.0 {
            asset_price
        } else {
            0.0
        }
    }
}
