// src/domain/metrics.rs

/// Share of gross rent assumed to survive operating expenses.
pub const NET_OPERATING_RATIO: f64 = 0.60;

/// Gross cap rate as a percentage: `monthly_rent * 12 / valuation * 100`.
///
/// Returns `None` when the valuation is not positive, so an undefined rate is
/// never confused with a legitimate 0%.
pub fn cap_rate(valuation: f64, monthly_rent: f64) -> Option<f64> {
    annual_yield(valuation, monthly_rent * 12.0)
}

/// Cap rate on the net operating income (60% of gross rent).
pub fn net_cap_rate(valuation: f64, monthly_rent: f64) -> Option<f64> {
    annual_yield(valuation, monthly_rent * 12.0 * NET_OPERATING_RATIO)
}

/// Valuation per square foot of living area.
pub fn price_per_area(valuation: f64, living_area: Option<f64>) -> Option<f64> {
    let area = living_area.filter(|a| *a > 0.0)?;
    Some(valuation / area).filter(|v| v.is_finite())
}

fn annual_yield(valuation: f64, annual_income: f64) -> Option<f64> {
    if valuation.is_nan() || valuation <= 0.0 {
        return None;
    }
    Some(annual_income / valuation * 100.0).filter(|r| r.is_finite())
}

/// Renders a rate as `"12.00%"`.
pub fn format_percent(rate: f64) -> String {
    format!("{rate:.2}%")
}
