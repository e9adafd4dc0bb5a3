//! Bundle confidence
//!
//! A single scalar summarizing how much the survey source's reported
//! uncertainty should temper the advisory. No uncertainty data at all (the
//! fallback path) pins the score at 0.70.

use crate::round2;
use std::collections::BTreeMap;

/// Returned when the survey reported no uncertainty values.
pub const NO_UNCERTAINTY_CONFIDENCE: f64 = 0.70;
pub const MIN_CONFIDENCE: f64 = 0.60;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Score one uncertainty map: 0.95 minus one point per unit of mean
/// uncertainty, floored at 0.60 and rounded to 2 decimals.
pub fn confidence_score(uncertainties: &BTreeMap<String, f64>) -> f64 {
    if uncertainties.is_empty() {
        return NO_UNCERTAINTY_CONFIDENCE;
    }
    let mean = uncertainties.values().sum::<f64>() / uncertainties.len() as f64;
    round2(MAX_CONFIDENCE - 0.01 * mean).max(MIN_CONFIDENCE)
}
