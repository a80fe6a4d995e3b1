//! Plain vanilla contracts: European, American and Bermudan exercise.

use ot_core::{ensure, Rate, Real, Result, Settings, Size, Time, Volatility};
use ot_math::black_scholes_price;

use crate::function_provider::{
    fold_binomial, fold_trinomial, BinomialLayer, ContractTerms, OptionFunctionProvider1D,
    TrinomialLayer,
};
use crate::option_type::OptionType;

// ────────────────────────────────────────────────────────────────────────────
// European
// ────────────────────────────────────────────────────────────────────────────

/// European call or put, `max(φ(S − K), 0)` at expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanVanillaOption {
    terms: ContractTerms,
}

impl EuropeanVanillaOption {
    /// Create a European vanilla option.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        Ok(Self { terms: ContractTerms::new(strike, time_to_expiry, steps, option_type)? })
    }
}

impl OptionFunctionProvider1D for EuropeanVanillaOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.terms.option_type().intrinsic(asset_price, self.terms.strike())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// American
// ────────────────────────────────────────────────────────────────────────────

/// Flat market inputs used to evaluate the closed-form Black-Scholes value
/// inside accelerated or truncated American recursions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedFormInputs {
    /// Volatility.
    pub volatility: Volatility,
    /// Risk-free rate.
    pub rate: Rate,
    /// Continuous dividend yield.
    pub dividend_yield: Rate,
}

impl ClosedFormInputs {
    /// Validated inputs: volatility finite and positive, rates finite.
    pub fn new(volatility: Volatility, rate: Rate, dividend_yield: Rate) -> Result<Self> {
        ensure!(
            volatility.is_finite() && volatility > 0.0,
            "volatility must be finite and positive, got {volatility}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        ensure!(dividend_yield.is_finite(), "dividend yield must be finite, got {dividend_yield}");
        Ok(Self { volatility, rate, dividend_yield })
    }
}

/// How an American recursion treats the nodes it does not roll back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AmericanMethod {
    /// Every node is `max(expectation, intrinsic)`.
    #[default]
    Plain,
    /// The last layer before expiry takes `max(Black-Scholes, intrinsic)`.
    Acceleration(ClosedFormInputs),
    /// Nodes outside `centre · e^{±kσ√T}` take `max(Black-Scholes, intrinsic)`.
    Truncation {
        /// Market inputs of the closed form.
        inputs: ClosedFormInputs,
        /// Band half-width `k` in standard deviations.
        width: Real,
    },
    /// [`Acceleration`](Self::Acceleration) and [`Truncation`](Self::Truncation) together.
    AcceleratedTruncation {
        /// Market inputs of the closed form.
        inputs: ClosedFormInputs,
        /// Band half-width `k` in standard deviations.
        width: Real,
    },
}

impl AmericanMethod {
    /// Truncation with the band width from [`Settings`].
    pub fn truncation_default(inputs: ClosedFormInputs) -> Self {
        AmericanMethod::Truncation { inputs, width: Settings::instance().truncation_width() }
    }

    /// Accelerated truncation with the band width from [`Settings`].
    pub fn accelerated_truncation_default(inputs: ClosedFormInputs) -> Self {
        AmericanMethod::AcceleratedTruncation {
            inputs,
            width: Settings::instance().truncation_width(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(width) = self.band_width() {
            ensure!(
                width.is_finite() && width > 0.0,
                "truncation width must be finite and positive, got {width}"
            );
        }
        Ok(())
    }

    fn inputs(&self) -> Option<&ClosedFormInputs> {
        match self {
            AmericanMethod::Plain => None,
            AmericanMethod::Acceleration(inputs)
            | AmericanMethod::Truncation { inputs, .. }
            | AmericanMethod::AcceleratedTruncation { inputs, .. } => Some(inputs),
        }
    }

    fn accelerates(&self) -> bool {
        matches!(
            self,
            AmericanMethod::Acceleration(_) | AmericanMethod::AcceleratedTruncation { .. }
        )
    }

    fn band_width(&self) -> Option<Real> {
        match *self {
            AmericanMethod::Truncation { width, .. }
            | AmericanMethod::AcceleratedTruncation { width, .. } => Some(width),
            _ => None,
        }
    }
}

/// American call or put.
#[derive(Debug, Clone, PartialEq)]
pub struct AmericanVanillaOption {
    terms: ContractTerms,
    method: AmericanMethod,
}

impl AmericanVanillaOption {
    /// American option rolled back node by node.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        Self::with_method(strike, time_to_expiry, steps, option_type, AmericanMethod::Plain)
    }

    /// American option with an accelerated or truncated recursion.
    pub fn with_method(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        method: AmericanMethod,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, time_to_expiry, steps, option_type)?;
        method.validate()?;
        Ok(Self { terms, method })
    }

    /// The recursion strategy.
    pub fn method(&self) -> &AmericanMethod {
        &self.method
    }

    fn closed_form(&self, asset_price: Real, remaining: Time, inputs: &ClosedFormInputs) -> Real {
        let european = black_scholes_price(
            asset_price,
            self.terms.strike(),
            remaining,
            inputs.volatility,
            inputs.rate,
            inputs.rate - inputs.dividend_yield,
            self.terms.option_type().is_call(),
        );
        european.max(self.payoff(asset_price))
    }

    /// Closure deciding the value of each node of layer `step` whose
    /// centre asset price is `centre`.
    fn node_rule(&self, step: Size, centre: Real) -> impl Fn(Real, Real) -> Real + '_ {
        let inputs = self.method.inputs().copied();
        let remaining = self.terms.time_to_expiry() - step as Real * self.terms.dt();
        let accelerate = self.method.accelerates() && step + 1 == self.terms.steps();
        let band = match (inputs, self.method.band_width()) {
            (Some(inputs), Some(width)) => {
                let half = width * inputs.volatility * self.terms.time_to_expiry().sqrt();
                Some((centre * (-half).exp(), centre * half.exp()))
            }
            _ => None,
        };
        move |price, continuation| match inputs {
            Some(inputs)
                if accelerate || band.is_some_and(|(low, high)| price < low || price > high) =>
            {
                self.closed_form(price, remaining, &inputs)
            }
            _ => continuation.max(self.payoff(price)),
        }
    }
}

impl OptionFunctionProvider1D for AmericanVanillaOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.terms.option_type().intrinsic(asset_price, self.terms.strike())
    }

    fn early_exercise(&self, _step: Size) -> bool {
        true
    }

    fn next_layer_values(&self, layer: &BinomialLayer, values: &[Real], out: &mut [Real]) {
        fold_binomial(layer, values, out, self.node_rule(layer.step, layer.centre_asset_price()));
    }

    fn next_layer_values_trinomial(&self, layer: &TrinomialLayer, values: &[Real], out: &mut [Real]) {
        fold_trinomial(layer, values, out, self.node_rule(layer.step, layer.centre_asset_price()));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bermudan
// ────────────────────────────────────────────────────────────────────────────

/// Vanilla option exercisable only at a finite set of times.
///
/// Each exercise time snaps to the nearest lattice step `round(t/dt)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BermudanOption {
    terms: ContractTerms,
    exercise_steps: Vec<Size>,
}

impl BermudanOption {
    /// Create a Bermudan option. `exercise_times` must be increasing, each
    /// in `(0, T]`, and no two may snap to the same step.
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        exercise_times: &[Time],
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, time_to_expiry, steps, option_type)?;
        let dt = terms.dt();
        let mut exercise_steps: Vec<Size> = Vec::with_capacity(exercise_times.len());
        let mut previous: Option<Time> = None;
        for &t in exercise_times {
            ensure!(
                t.is_finite() && t > 0.0 && t <= time_to_expiry,
                "exercise time {t} must lie in (0, {time_to_expiry}]"
            );
            if let Some(prev) = previous {
                ensure!(t > prev, "exercise times must be increasing, got {t} after {prev}");
            }
            let step = (t / dt).round() as Size;
            if let Some(&last) = exercise_steps.last() {
                ensure!(
                    step != last,
                    "exercise times {} and {t} both snap to step {step}",
                    previous.unwrap_or_default()
                );
            }
            exercise_steps.push(step);
            previous = Some(t);
        }
        Ok(Self { terms, exercise_steps })
    }

    /// Steps at which exercise is allowed, increasing.
    pub fn exercise_steps(&self) -> &[Size] {
        &self.exercise_steps
    }
}

impl OptionFunctionProvider1D for BermudanOption {
    fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.terms.option_type().intrinsic(asset_price, self.terms.strike())
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.exercise_steps.binary_search(&step).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ot_core::{Error, ScopedTruncationWidth};

    fn inputs() -> ClosedFormInputs {
        ClosedFormInputs::new(0.2, 0.05, 0.0).unwrap()
    }

    #[test]
    fn vanilla_payoffs() {
        let call = EuropeanVanillaOption::new(100.0, 1.0, 10, OptionType::Call).unwrap();
        assert_eq!(call.payoff(120.0), 20.0);
        assert_eq!(call.payoff(80.0), 0.0);
        assert_eq!(call.strike(), Ok(100.0));
        assert_eq!(call.sign(), Ok(1.0));
        assert!(!call.early_exercise(3));

        let put = AmericanVanillaOption::new(100.0, 1.0, 10, OptionType::Put).unwrap();
        assert_eq!(put.payoff(80.0), 20.0);
        assert!(put.early_exercise(3));
        assert_eq!(put.method(), &AmericanMethod::Plain);
    }

    #[test]
    fn closed_form_inputs_are_validated() {
        assert!(matches!(ClosedFormInputs::new(0.0, 0.05, 0.0), Err(Error::Validation(_))));
        assert!(matches!(ClosedFormInputs::new(0.2, Real::NAN, 0.0), Err(Error::Validation(_))));
        let method = AmericanMethod::Truncation { inputs: inputs(), width: -2.0 };
        assert!(matches!(
            AmericanVanillaOption::with_method(100.0, 1.0, 10, OptionType::Put, method),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn default_truncation_width_comes_from_settings() {
        let _guard = ScopedTruncationWidth::new(4.5);
        match AmericanMethod::truncation_default(inputs()) {
            AmericanMethod::Truncation { width, .. } => assert_relative_eq!(width, 4.5),
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn acceleration_uses_closed_form_on_last_layer() {
        let option = AmericanVanillaOption::with_method(
            100.0,
            1.0,
            10,
            OptionType::Put,
            AmericanMethod::Acceleration(inputs()),
        )
        .unwrap();
        let layer = BinomialLayer {
            step: 9,
            discount: 1.0,
            up_probability: 0.5,
            down_probability: 0.5,
            base_asset_price: 100.0,
            dividend_correction: 0.0,
            down_factor: 1.0,
            factor_ratio: 1.0,
        };
        let values = vec![0.0; 11];
        let mut out = vec![0.0; 11];
        option.next_layer_values(&layer, &values, &mut out);
        let expected = black_scholes_price(100.0, 100.0, 0.1, 0.2, 0.05, 0.05, false);
        assert_relative_eq!(out[0], expected, epsilon = 1e-12);
        assert!(out[0] > 0.0);
    }

    #[test]
    fn truncation_replaces_nodes_outside_band() {
        let option = AmericanVanillaOption::with_method(
            100.0,
            1.0,
            10,
            OptionType::Call,
            AmericanMethod::Truncation { inputs: inputs(), width: 1.0 },
        )
        .unwrap();
        // Nodes at 50, 100 and 200: the band is 100·e^{±0.2}.
        let layer = BinomialLayer {
            step: 2,
            discount: 1.0,
            up_probability: 0.5,
            down_probability: 0.5,
            base_asset_price: 200.0,
            dividend_correction: 0.0,
            down_factor: 0.5,
            factor_ratio: 2.0,
        };
        let values = vec![-1.0; 4];
        let mut out = vec![0.0; 3];
        option.next_layer_values(&layer, &values, &mut out);
        assert_relative_eq!(
            out[0],
            black_scholes_price(50.0, 100.0, 0.8, 0.2, 0.05, 0.05, true),
            epsilon = 1e-12
        );
        // The centre node rolls back normally and is floored by intrinsic.
        assert_eq!(out[1], 0.0);
        assert_relative_eq!(
            out[2],
            black_scholes_price(200.0, 100.0, 0.8, 0.2, 0.05, 0.05, true).max(100.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn bermudan_snaps_exercise_times() {
        let option =
            BermudanOption::new(100.0, 1.0, 100, OptionType::Put, &[0.25, 0.5, 0.751]).unwrap();
        assert_eq!(option.exercise_steps(), &[25, 50, 75]);
        assert!(option.early_exercise(50));
        assert!(!option.early_exercise(51));
    }

    #[test]
    fn bermudan_schedule_validation() {
        for times in [&[0.0][..], &[1.5][..], &[0.5, 0.25][..], &[0.5, 0.501][..]] {
            assert!(matches!(
                BermudanOption::new(100.0, 1.0, 100, OptionType::Put, times),
                Err(Error::Validation(_))
            ));
        }
    }
}
