//! Trinomial tree pricing model.
//!
//! Layer `i` holds `2i + 1` nodes at `base · d^i · (m/d)^j + shift`. The
//! outer nodes one step after the root give delta and the outer and centre
//! nodes two steps after it give gamma; the centre node two steps on sits
//! back at the root's price, which is what a finite-difference theta reads.

use ot_core::{DiscountFactor, Probability, Rate, Real, Result, Size, Volatility};
use ot_instruments::{OptionFunctionProvider1D, TrinomialLayer};
use ot_methods::{
    finite_difference_theta, DividendFunctionProvider, LatticeInputs, LatticeSpecification,
    TimeVarying, TimeVaryingParameters, TrinomialParameters,
};
use tracing::debug;

use crate::greeks::TreeGreeks;
use crate::market::{MarketSnapshot, TimeVaryingMarket};
use crate::rollback::{ensure_probabilities, knocked_out, LayerPricing, Rollback, Snapshot};

/// Prices one-asset contracts on recombining trinomial trees.
///
/// Only lattices with a trinomial form can be used; binomial-only schemes
/// fail with `Error::UnsupportedConfiguration`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrinomialTreeOptionPricingModel;

struct Solved<'a> {
    rollback: Rollback,
    pricing: LayerPricing<'a>,
    parameters: TrinomialParameters,
    market: MarketSnapshot,
    dt: Real,
}

struct SolvedPath {
    rollback: Rollback,
    pricing: LayerPricing<'static>,
    path: TimeVaryingParameters,
    dt: Real,
}

/// Probabilities of one layer: discount, up, middle, down.
type StepParameters = (DiscountFactor, Probability, Probability, Probability);

fn roll_back<F, P>(
    function: &F,
    pricing: &mut LayerPricing<'_>,
    down_factor: Real,
    factor_ratio: Real,
    mut step_parameters: P,
) -> Rollback
where
    F: OptionFunctionProvider1D + ?Sized,
    P: FnMut(Size) -> StepParameters,
{
    let steps = function.steps();
    let terminal = pricing.terminal();
    let lowest = terminal.base * down_factor.powi(steps as i32);
    let mut values = function.payoff_at_expiry_trinomial(lowest, factor_ratio);
    let mut out = vec![0.0; values.len()];
    let mut depth1 = Snapshot::default();
    let mut depth2 = Snapshot::default();

    for step in (0..steps).rev() {
        let geometry = pricing.layer(step);
        let (discount, up_probability, middle_probability, down_probability) = step_parameters(step);
        let layer = TrinomialLayer {
            step,
            discount,
            up_probability,
            middle_probability,
            down_probability,
            base_asset_price: geometry.base,
            dividend_correction: geometry.shift,
            down_factor,
            factor_ratio,
        };
        function.next_layer_values_trinomial(&layer, &values, &mut out);
        std::mem::swap(&mut values, &mut out);
        match step {
            2 => {
                depth2 = Snapshot {
                    values: [values[0], values[2], values[4]],
                    correction: geometry.correction,
                }
            }
            1 => {
                depth1 = Snapshot {
                    values: [values[0], values[2]],
                    correction: geometry.correction,
                }
            }
            _ => {}
        }
    }

    Rollback { value: values[0], depth1, depth2 }
}

/// Cumulative factors of the outer nodes at depth one and of the outer and
/// centre nodes at depth two.
fn greek_factors(down_factor: Real, factor_ratio: Real) -> ([Real; 2], [Real; 3]) {
    let ratio2 = factor_ratio * factor_ratio;
    let down2 = down_factor * down_factor;
    (
        [down_factor, down_factor * ratio2],
        [down2, down2 * ratio2, down2 * ratio2 * ratio2],
    )
}

impl TrinomialTreeOptionPricingModel {
    /// Price with a continuous dividend yield.
    pub fn price<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
    ) -> Result<Real>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, dividend_yield)?;
        Ok(self
            .solve(lattice, function, market, None)?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks with a continuous dividend yield.
    pub fn greeks<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
    ) -> Result<TreeGreeks>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, dividend_yield)?;
        Ok(self
            .solve(lattice, function, market, None)?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks(lattice)))
    }

    /// Price with discrete dividends.
    pub fn price_with_dividends<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividends: &dyn DividendFunctionProvider,
    ) -> Result<Real>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, 0.0)?;
        Ok(self
            .solve(lattice, function, market, Some(dividends))?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks with discrete dividends.
    pub fn greeks_with_dividends<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividends: &dyn DividendFunctionProvider,
    ) -> Result<TreeGreeks>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, 0.0)?;
        Ok(self
            .solve(lattice, function, market, Some(dividends))?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks(lattice)))
    }

    /// Price on the [`TimeVarying`] lattice.
    pub fn price_time_varying<F>(
        &self,
        function: &F,
        spot: Real,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
    ) -> Result<Real>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = TimeVaryingMarket::new(spot, volatilities, rates, dividend_yields, function.steps())?;
        Ok(self
            .solve_time_varying(function, &market)?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks on the [`TimeVarying`] lattice.
    pub fn greeks_time_varying<F>(
        &self,
        function: &F,
        spot: Real,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
    ) -> Result<TreeGreeks>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = TimeVaryingMarket::new(spot, volatilities, rates, dividend_yields, function.steps())?;
        Ok(self
            .solve_time_varying(function, &market)?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks()))
    }

    fn solve<'a, L, F>(
        &self,
        lattice: &L,
        function: &F,
        market: MarketSnapshot,
        dividends: Option<&'a dyn DividendFunctionProvider>,
    ) -> Result<Option<Solved<'a>>>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        if knocked_out(function, market.spot()) {
            return Ok(None);
        }
        let steps = function.steps();
        let time_to_expiry = function.time_to_expiry();
        let dt = time_to_expiry / steps as Real;
        let mut pricing = match dividends {
            Some(provider) => {
                LayerPricing::with_dividends(provider, market.spot(), market.rate(), dt, time_to_expiry)?
            }
            None => LayerPricing::flat(market.spot()),
        };

        let inputs = LatticeInputs {
            spot: pricing.base_spot(),
            strike: function.terms().strike(),
            time_to_expiry,
            volatility: market.volatility(),
            cost_of_carry: market.cost_of_carry(),
            steps,
            dt,
        };
        let parameters = lattice.trinomial_parameters(&inputs)?;
        ensure_probabilities(
            lattice.name(),
            &[
                parameters.up_probability,
                parameters.middle_probability,
                parameters.down_probability,
            ],
        )?;
        let discount = (-market.rate() * dt).exp();
        debug!(
            model = "trinomial",
            lattice = lattice.name(),
            steps,
            dt,
            up_factor = parameters.up_factor,
            middle_factor = parameters.middle_factor,
            down_factor = parameters.down_factor,
            up_probability = parameters.up_probability,
            down_probability = parameters.down_probability,
            discrete_dividends = dividends.is_some(),
            "rolling back trinomial tree"
        );

        let rollback = roll_back(
            function,
            &mut pricing,
            parameters.down_factor,
            parameters.factor_ratio(),
            |_| {
                (
                    discount,
                    parameters.up_probability,
                    parameters.middle_probability,
                    parameters.down_probability,
                )
            },
        );
        Ok(Some(Solved { rollback, pricing, parameters, market, dt }))
    }

    fn solve_time_varying<F>(&self, function: &F, market: &TimeVaryingMarket) -> Result<Option<SolvedPath>>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        if knocked_out(function, market.spot()) {
            return Ok(None);
        }
        let steps = function.steps();
        let dt = function.time_to_expiry() / steps as Real;
        let path = TimeVarying.trinomial_path(
            market.volatilities(),
            market.rates(),
            market.dividend_yields(),
            dt,
        )?;
        for step in &path.steps {
            ensure_probabilities(
                TimeVarying.name(),
                &[step.up_probability, step.middle_probability, step.down_probability],
            )?;
        }
        debug!(
            model = "trinomial",
            lattice = TimeVarying.name(),
            steps,
            dt,
            space_step = path.space_step,
            "rolling back time-varying trinomial tree"
        );

        let mut pricing = LayerPricing::flat(market.spot());
        let rollback = roll_back(function, &mut pricing, path.down_factor(), path.up_factor(), |step| {
            let parameters = &path.steps[step];
            (
                parameters.discount,
                parameters.up_probability,
                parameters.middle_probability,
                parameters.down_probability,
            )
        });
        Ok(Some(SolvedPath { rollback, pricing, path, dt }))
    }
}

impl Solved<'_> {
    fn greeks<L>(&self, lattice: &L) -> TreeGreeks
    where
        L: LatticeSpecification + ?Sized,
    {
        let (delta_factors, gamma_factors) =
            greek_factors(self.parameters.down_factor, self.parameters.factor_ratio());
        let market = &self.market;
        self.rollback.greeks(&self.pricing, delta_factors, gamma_factors, |inputs| {
            lattice.theta(
                market.spot(),
                market.volatility(),
                market.rate(),
                market.dividend_yield(),
                self.dt,
                inputs,
            )
        })
    }
}

impl SolvedPath {
    fn greeks(&self) -> TreeGreeks {
        let (delta_factors, gamma_factors) = greek_factors(self.path.down_factor(), self.path.up_factor());
        self.rollback.greeks(&self.pricing, delta_factors, gamma_factors, |inputs| {
            finite_difference_theta(self.dt, inputs)
        })
    }
}
