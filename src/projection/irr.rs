//! Internal rate of return for periodic cash flows
//!
//! Used for the effective rate a borrower pays once subsidies and extra payments
//! are taken into account.

const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// Periodic rate bounds searched by the bisection fallback
const LOWER_BOUND: f64 = -0.99;
const UPPER_BOUND: f64 = 1.0;

/// Solve for the periodic rate at which the cash flows have zero NPV.
///
/// `cashflows[0]` is at t = 0. Returns `None` when the flows never change sign or
/// no root lies in the searched range.
pub fn periodic_irr(cashflows: &[f64]) -> Option<f64> {
    let has_inflow = cashflows.iter().any(|&cf| cf > 0.0);
    let has_outflow = cashflows.iter().any(|&cf| cf < 0.0);
    if !has_inflow || !has_outflow {
        return None;
    }

    newton(cashflows).or_else(|| bisection(cashflows))
}

/// Convert a periodic rate to an effective annual rate
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

fn newton(cashflows: &[f64]) -> Option<f64> {
    let mut rate = 0.005;

    for _ in 0..MAX_ITERATIONS {
        let (value, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-18 {
            return None;
        }

        let next = rate - value / slope;
        if !next.is_finite() || next <= LOWER_BOUND || next >= UPPER_BOUND {
            return None;
        }
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    None
}

fn bisection(cashflows: &[f64]) -> Option<f64> {
    let (mut low, mut high) = (LOWER_BOUND, UPPER_BOUND);
    let mut npv_low = npv(cashflows, low);
    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS * 5 {
        let mid = 0.5 * (low + high);
        let npv_mid = npv(cashflows, mid);
        if npv_mid.abs() < TOLERANCE || high - low < TOLERANCE {
            return Some(mid);
        }
        if npv_low * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Some(0.5 * (low + high))
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    let factor = 1.0 / (1.0 + rate);
    let mut discount = 1.0;
    let mut total = 0.0;
    for &cf in cashflows {
        total += cf * discount;
        discount *= factor;
    }
    total
}

fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let factor = 1.0 / (1.0 + rate);
    let mut discount = 1.0;
    let mut value = 0.0;
    let mut slope = 0.0;
    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf * discount;
        slope -= t as f64 * cf * discount * factor;
        discount *= factor;
    }
    (value, slope)
}
