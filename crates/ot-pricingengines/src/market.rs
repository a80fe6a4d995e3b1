//! Validated market inputs of one pricing call.
//!
//! Snapshots are built at the top of every entry point, before any lattice
//! work, so that a bad input fails fast with `Error::Validation`.

use ot_core::{ensure, Rate, Real, Result, Size, Volatility};

fn check_spot(spot: Real) -> Result<()> {
    ensure!(spot.is_finite() && spot > 0.0, "spot must be finite and positive, got {spot}");
    Ok(())
}

fn check_volatility(volatility: Volatility) -> Result<()> {
    ensure!(
        volatility.is_finite() && volatility > 0.0,
        "volatility must be finite and positive, got {volatility}"
    );
    Ok(())
}

fn check_rate(name: &str, rate: Rate) -> Result<()> {
    ensure!(rate.is_finite(), "{name} must be finite, got {rate}");
    Ok(())
}

/// Flat one-asset market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketSnapshot {
    spot: Real,
    volatility: Volatility,
    rate: Rate,
    dividend_yield: Rate,
}

impl MarketSnapshot {
    /// Spot and volatility finite and positive, rates finite.
    pub fn new(spot: Real, volatility: Volatility, rate: Rate, dividend_yield: Rate) -> Result<Self> {
        check_spot(spot)?;
        check_volatility(volatility)?;
        check_rate("rate", rate)?;
        check_rate("dividend yield", dividend_yield)?;
        Ok(Self { spot, volatility, rate, dividend_yield })
    }

    /// Spot price.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// `r − q`.
    pub fn cost_of_carry(&self) -> Rate {
        self.rate - self.dividend_yield
    }
}

/// One-asset market with a volatility, rate and dividend yield per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVaryingMarket {
    spot: Real,
    volatilities: Vec<Volatility>,
    rates: Vec<Rate>,
    dividend_yields: Vec<Rate>,
}

impl TimeVaryingMarket {
    /// Every vector must hold exactly `steps` finite entries and every
    /// volatility must be positive.
    pub fn new(
        spot: Real,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
        steps: Size,
    ) -> Result<Self> {
        check_spot(spot)?;
        for (name, len) in [
            ("volatility", volatilities.len()),
            ("rate", rates.len()),
            ("dividend yield", dividend_yields.len()),
        ] {
            ensure!(len == steps, "{name} vector has {len} entries but the lattice has {steps} steps");
        }
        for &volatility in volatilities {
            check_volatility(volatility)?;
        }
        for &rate in rates {
            check_rate("rate", rate)?;
        }
        for &dividend_yield in dividend_yields {
            check_rate("dividend yield", dividend_yield)?;
        }
        Ok(Self {
            spot,
            volatilities: volatilities.to_vec(),
            rates: rates.to_vec(),
            dividend_yields: dividend_yields.to_vec(),
        })
    }

    /// Spot price.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Volatility of each step, root first.
    pub fn volatilities(&self) -> &[Volatility] {
        &self.volatilities
    }

    /// Risk-free rate of each step.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Dividend yield of each step.
    pub fn dividend_yields(&self) -> &[Rate] {
        &self.dividend_yields
    }
}

/// Flat two-asset market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoAssetMarket {
    /// Spot of asset 1.
    pub spot1: Real,
    /// Spot of asset 2.
    pub spot2: Real,
    /// Volatility of asset 1.
    pub volatility1: Volatility,
    /// Volatility of asset 2.
    pub volatility2: Volatility,
    /// Correlation of the two log-returns.
    pub correlation: Real,
    /// Risk-free rate.
    pub rate: Rate,
    /// Dividend yield of asset 1.
    pub dividend_yield1: Rate,
    /// Dividend yield of asset 2.
    pub dividend_yield2: Rate,
}

impl TwoAssetMarket {
    /// Spots and volatilities finite and positive, correlation in `[−1, 1]`,
    /// rates finite.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot1: Real,
        spot2: Real,
        volatility1: Volatility,
        volatility2: Volatility,
        correlation: Real,
        rate: Rate,
        dividend_yield1: Rate,
        dividend_yield2: Rate,
    ) -> Result<Self> {
        check_spot(spot1)?;
        check_spot(spot2)?;
        check_volatility(volatility1)?;
        check_volatility(volatility2)?;
        ensure!(
            (-1.0..=1.0).contains(&correlation),
            "correlation must lie in [-1, 1], got {correlation}"
        );
        check_rate("rate", rate)?;
        check_rate("dividend yield", dividend_yield1)?;
        check_rate("dividend yield", dividend_yield2)?;
        Ok(Self {
            spot1,
            spot2,
            volatility1,
            volatility2,
            correlation,
            rate,
            dividend_yield1,
            dividend_yield2,
        })
    }
}
