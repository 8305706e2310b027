//! Numeric helpers used by the derivation pass.

/// Standard statistical median.
///
/// Odd-length input yields the middle value of the sorted data, even-length
/// input the mean of the two central values.
///
/// # Returns
///
/// `None` for empty input or if any value is NaN.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Share of `count` in `total`, expressed in percent.
///
/// The division happens before scaling so results match `count / total * 100`
/// exactly. A zero `total` yields 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}
