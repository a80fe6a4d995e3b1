//! Closed-form Black-Scholes-Merton price.
//!
//! Generalised form with a cost-of-carry term `b`:
//!
//! $$C = S e^{(b-r)T} N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S e^{(b-r)T} N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (b \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
//! `b = r − q` gives the continuous-dividend model.

use ot_core::Real;

use crate::distributions::normal_cdf;

/// Black-Scholes-Merton price of a European call (`is_call`) or put.
///
/// A non-positive `time_to_expiry` returns the intrinsic value; a vanishing
/// standard deviation returns the discounted intrinsic value of the forward.
pub fn black_scholes_price(
    spot: Real,
    strike: Real,
    time_to_expiry: Real,
    volatility: Real,
    rate: Real,
    cost_of_carry: Real,
    is_call: bool,
) -> Real {
    let phi = if is_call { 1.0 } else { -1.0 };
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let df_r = (-rate * t).exp();
    let df_carry = ((cost_of_carry - rate) * t).exp();
    let std_dev = volatility * t.sqrt();

    if std_dev < 1e-15 || strike <= 0.0 {
        let forward = spot * (cost_of_carry * t).exp();
        return df_r * (phi * (forward - strike)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (cost_of_carry + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * df_carry * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2))
}
