/// Two-decimal rendering for amounts and PnL.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// One-decimal percentage of a `0..=1` ratio.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}", ratio * 100.0)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
