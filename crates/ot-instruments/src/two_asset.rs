//! Contracts on two correlated assets, priced on the four-branch binomial
//! lattice.

use ot_core::{ensure, not_applicable, Real, Result, Size, Time};

use crate::exercise::ExerciseStyle;
use crate::function_provider::{ContractTerms, OptionFunctionProvider2D};
use crate::option_type::OptionType;

macro_rules! exercise_constructors {
    ($ty:ident, ($($arg:ident: $arg_ty:ty),*)) => {
        impl $ty {
            /// European exercise.
            pub fn european($($arg: $arg_ty),*) -> Result<Self> {
                Self::new($($arg,)* ExerciseStyle::European)
            }

            /// American exercise.
            pub fn american($($arg: $arg_ty),*) -> Result<Self> {
                Self::new($($arg,)* ExerciseStyle::American)
            }

            /// Exercise style.
            pub fn exercise(&self) -> ExerciseStyle {
                self.exercise
            }
        }
    };
}

/// `max(φ(S1 − S2 − K), 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadOption {
    terms: ContractTerms,
    exercise: ExerciseStyle,
}

impl SpreadOption {
    /// Create a spread option.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        Ok(Self { terms: ContractTerms::two_asset(strike, time_to_expiry, steps, option_type)?, exercise })
    }
}

exercise_constructors!(SpreadOption, (strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType));

impl OptionFunctionProvider2D for SpreadOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real {
        self.terms
            .option_type()
            .intrinsic(asset_price1 - asset_price2, self.terms.strike())
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise.allows_exercise_at(step)
    }
}

/// `max(Q1·S1 − Q2·S2, 0)`: the right to exchange `Q2` units of asset 2 for
/// `Q1` units of asset 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOption {
    terms: ContractTerms,
    quantity1: Real,
    quantity2: Real,
    exercise: ExerciseStyle,
}

impl ExchangeOption {
    /// Create an exchange option.
    pub fn new(
        quantity1: Real,
        quantity2: Real,
        time_to_expiry: Time,
        steps: Size,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        ensure!(
            quantity1.is_finite() && quantity1 > 0.0,
            "quantity of asset 1 must be finite and positive, got {quantity1}"
        );
        ensure!(
            quantity2.is_finite() && quantity2 > 0.0,
            "quantity of asset 2 must be finite and positive, got {quantity2}"
        );
        let terms = ContractTerms::two_asset(0.0, time_to_expiry, steps, OptionType::Call)?;
        Ok(Self { terms, quantity1, quantity2, exercise })
    }
}

exercise_constructors!(ExchangeOption, (quantity1: Real, quantity2: Real, time_to_expiry: Time, steps: Size));

impl OptionFunctionProvider2D for ExchangeOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn strike(&self) -> Result<Real> {
        not_applicable!("an exchange option has no strike")
    }

    fn sign(&self) -> Result<Real> {
        not_applicable!("an exchange option has no call/put sign")
    }

    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real {
        (self.quantity1 * asset_price1 - self.quantity2 * asset_price2).max(0.0)
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise.allows_exercise_at(step)
    }
}

/// `max(φ(S1·S2 − K), 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOption {
    terms: ContractTerms,
    exercise: ExerciseStyle,
}

impl ProductOption {
    /// Create a product option.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        Ok(Self { terms: ContractTerms::two_asset(strike, time_to_expiry, steps, option_type)?, exercise })
    }
}

exercise_constructors!(ProductOption, (strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType));

impl OptionFunctionProvider2D for ProductOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real {
        self.terms
            .option_type()
            .intrinsic(asset_price1 * asset_price2, self.terms.strike())
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise.allows_exercise_at(step)
    }
}

/// Two-asset correlation option: asset 1 triggers, asset 2 pays.
///
/// Call: `S2 − K2` if `S1 > K1` and `S2 > K2`; put: `K2 − S2` if `S1 < K1`
/// and `S2 < K2`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoAssetCorrelationOption {
    terms: ContractTerms,
    trigger_strike: Real,
    exercise: ExerciseStyle,
}

impl TwoAssetCorrelationOption {
    /// Create a correlation option with trigger `trigger_strike` on asset 1
    /// and `payoff_strike` on asset 2.
    pub fn new(
        trigger_strike: Real,
        payoff_strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        ensure!(
            trigger_strike.is_finite() && trigger_strike >= 0.0,
            "trigger strike must be finite and non-negative, got {trigger_strike}"
        );
        let terms = ContractTerms::two_asset(payoff_strike, time_to_expiry, steps, option_type)?;
        Ok(Self { terms, trigger_strike, exercise })
    }

    /// Strike on asset 1.
    pub fn trigger_strike(&self) -> Real {
        self.trigger_strike
    }

    /// Strike on asset 2.
    pub fn payoff_strike(&self) -> Real {
        self.terms.strike()
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.terms.option_type()
    }
}

exercise_constructors!(
    TwoAssetCorrelationOption,
    (trigger_strike: Real, payoff_strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType)
);

impl OptionFunctionProvider2D for TwoAssetCorrelationOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn strike(&self) -> Result<Real> {
        not_applicable!("a two-asset correlation option has two strikes")
    }

    fn sign(&self) -> Result<Real> {
        not_applicable!("a two-asset correlation option has no single call/put sign")
    }

    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real {
        let phi = self.terms.option_type().sign();
        let payoff_strike = self.terms.strike();
        if phi * (asset_price1 - self.trigger_strike) > 0.0 && phi * (asset_price2 - payoff_strike) > 0.0 {
            phi * (asset_price2 - payoff_strike)
        } else {
            0.0
        }
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise.allows_exercise_at(step)
    }
}

/// `max(φ(S1/S2 − K), 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeOutperformanceOption {
    terms: ContractTerms,
    exercise: ExerciseStyle,
}

impl RelativeOutperformanceOption {
    /// Create a relative outperformance option.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        Ok(Self { terms: ContractTerms::two_asset(strike, time_to_expiry, steps, option_type)?, exercise })
    }
}

exercise_constructors!(
    RelativeOutperformanceOption,
    (strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType)
);

impl OptionFunctionProvider2D for RelativeOutperformanceOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real {
        self.terms
            .option_type()
            .intrinsic(asset_price1 / asset_price2, self.terms.strike())
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise.allows_exercise_at(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function_provider::TwoAssetLayer;
    use approx::assert_relative_eq;
    use ot_core::Error;

    #[test]
    fn payoffs() {
        let spread = SpreadOption::european(5.0, 1.0, 10, OptionType::Call).unwrap();
        assert_eq!(spread.payoff(110.0, 100.0), 5.0);
        assert_eq!(spread.payoff(100.0, 100.0), 0.0);

        let exchange = ExchangeOption::european(1.0, 2.0, 1.0, 10).unwrap();
        assert_eq!(exchange.payoff(100.0, 40.0), 20.0);
        assert_eq!(exchange.payoff(100.0, 60.0), 0.0);

        let product = ProductOption::european(100.0, 1.0, 10, OptionType::Put).unwrap();
        assert_eq!(product.payoff(5.0, 10.0), 50.0);

        let relative = RelativeOutperformanceOption::european(1.0, 1.0, 10, OptionType::Call).unwrap();
        assert_relative_eq!(relative.payoff(120.0, 100.0), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn correlation_payoff_needs_both_conditions() {
        let call = TwoAssetCorrelationOption::european(100.0, 90.0, 1.0, 10, OptionType::Call).unwrap();
        assert_eq!(call.payoff(101.0, 95.0), 5.0);
        assert_eq!(call.payoff(99.0, 95.0), 0.0);
        assert_eq!(call.payoff(101.0, 85.0), 0.0);

        let put = TwoAssetCorrelationOption::european(100.0, 90.0, 1.0, 10, OptionType::Put).unwrap();
        assert_eq!(put.payoff(99.0, 85.0), 5.0);
        assert_eq!(put.payoff(101.0, 85.0), 0.0);
    }

    #[test]
    fn disabled_accessors() {
        let exchange = ExchangeOption::american(1.0, 1.0, 1.0, 10).unwrap();
        assert!(matches!(exchange.strike(), Err(Error::NotApplicable(_))));
        assert!(matches!(exchange.sign(), Err(Error::NotApplicable(_))));
        assert!(exchange.early_exercise(4));

        let corr = TwoAssetCorrelationOption::european(0.0, 100.0, 1.0, 10, OptionType::Call).unwrap();
        assert!(matches!(corr.strike(), Err(Error::NotApplicable(_))));
        assert!(matches!(corr.sign(), Err(Error::NotApplicable(_))));
        assert_eq!(corr.payoff_strike(), 100.0);

        assert!(matches!(
            ExchangeOption::european(0.0, 1.0, 1.0, 10),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn terminal_grid_is_row_major_over_asset_one() {
        let spread = SpreadOption::european(0.0, 1.0, 3, OptionType::Call).unwrap();
        let values = spread.payoff_at_expiry(1.0, 1.0, 2.0, 3.0);
        assert_eq!(values.len(), 16);
        // Node (a, c) = (3, 0): asset 1 at 8, asset 2 at 1.
        assert_eq!(values[3 * 4], 7.0);
        // Node (0, 3): asset 1 at 1, asset 2 at 27.
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn layer_fold_and_early_exercise() {
        let layer = TwoAssetLayer {
            step: 0,
            discount: 1.0,
            up_up_probability: 0.25,
            up_down_probability: 0.25,
            down_up_probability: 0.25,
            down_down_probability: 0.25,
            base_asset_price1: 100.0,
            base_asset_price2: 100.0,
            down_factor1: 1.0,
            down_factor2: 1.0,
            factor_ratio1: 1.0,
            factor_ratio2: 1.0,
        };
        let values = [4.0, 8.0, 12.0, 16.0];
        let mut out = [0.0; 4];
        let european = SpreadOption::european(0.0, 1.0, 10, OptionType::Put).unwrap();
        european.next_layer_values(&layer, &values, &mut out);
        assert_eq!(out[0], 10.0);

        let american = ProductOption::american(20_000.0, 1.0, 10, OptionType::Put).unwrap();
        american.next_layer_values(&layer, &values, &mut out);
        assert_eq!(out[0], 10_000.0);
    }
}
