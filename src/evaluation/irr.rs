//! Internal Rate of Return (IRR) calculation
//!
//! Finds the annual rate at which a cash-flow sequence discounts to zero.
//! Operates on the same year-indexed sequence the NPV calculation uses.

/// Root-acceptance criterion: a rate is the IRR when |NPV| falls at or below this
const NPV_TOLERANCE: f64 = 1e-6;

/// Iteration bound shared by Newton-Raphson and the bisection fallback
const MAX_ITERATIONS: u32 = 200;

/// Search domain for the annual rate: -99% to +1000%
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Calculate the Internal Rate of Return (IRR) for a series of annual cash
/// flows using the Newton-Raphson method with a bisection fallback.
///
/// # Arguments
/// * `cash_flows` - Cash flows by year, index 0 first (positive = inflow)
///
/// # Returns
/// * `Option<f64>` - IRR as a decimal (e.g., 0.05 for 5%), or None if no
///   root exists in the search domain or the solver fails to converge
pub fn calculate_irr(cash_flows: &[f64]) -> Option<f64> {
    if cash_flows.is_empty() {
        return None;
    }

    // A root needs at least one sign change. All-zero sequences land here
    // too: every rate discounts them to zero, so no single IRR is defined.
    let has_positive = cash_flows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cash_flows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    // Newton-Raphson from a conventional 5% starting guess
    let mut rate: f64 = 0.05;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);

        if npv.abs() <= NPV_TOLERANCE {
            return Some(rate);
        }

        if dnpv.abs() < 1e-20 {
            // Derivative too flat for a Newton step
            log::debug!(
                "IRR derivative vanished at rate {}, falling back to bisection",
                rate
            );
            return calculate_irr_bisection(cash_flows);
        }

        // Bound the rate to the search domain
        let new_rate = (rate - npv / dnpv).max(RATE_FLOOR).min(RATE_CEILING);

        if (new_rate - rate).abs() < 1e-12 {
            // Pinned against a domain boundary without converging
            return calculate_irr_bisection(cash_flows);
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge, try bisection
    calculate_irr_bisection(cash_flows)
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection over the full search domain
fn calculate_irr_bisection(cash_flows: &[f64]) -> Option<f64> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;

    let npv_low = npv_at_rate(cash_flows, low);
    let npv_high = npv_at_rate(cash_flows, high);

    if npv_low.abs() <= NPV_TOLERANCE {
        return Some(low);
    }
    if npv_high.abs() <= NPV_TOLERANCE {
        return Some(high);
    }

    // Check that a root is bracketed in this interval
    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cash_flows, mid);

        if npv_mid.abs() <= NPV_TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(cash_flows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

/// Calculate NPV of an annual cash-flow sequence at a given decimal rate
///
/// The slice index is the year; year 0 is undiscounted.
pub(crate) fn npv_at_rate(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
