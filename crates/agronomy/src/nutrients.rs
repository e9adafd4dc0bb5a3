//! Secondary-nutrient estimation
//!
//! Empirical regressions from normalized topsoil properties to eight
//! nutrient concentrations in ppm. Each estimate is clamped to its
//! documented band and rounded to 2 decimals, so the output is always a
//! usable concentration even for degenerate inputs.

use crate::{round2, SoilProperties};
use serde::{Deserialize, Serialize};

/// Clamp bands per nutrient (ppm).
pub const PHOSPHORUS_BAND: (f64, f64) = (3.0, 60.0);
pub const POTASSIUM_BAND: (f64, f64) = (60.0, 500.0);
pub const SULFUR_BAND: (f64, f64) = (3.0, 50.0);
pub const IRON_BAND: (f64, f64) = (10.0, 80.0);
pub const CALCIUM_BAND: (f64, f64) = (200.0, 5000.0);
pub const MAGNESIUM_BAND: (f64, f64) = (50.0, 800.0);
pub const ZINC_BAND: (f64, f64) = (0.5, 5.0);
pub const BORON_BAND: (f64, f64) = (0.2, 2.0);

/// These values are derived from regressions, never measured.
pub const DATA_QUALITY: &str = "estimated";

/// Estimated nutrient concentrations (ppm) for one soil record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientEstimate {
    pub phosphorus: f64,
    pub potassium: f64,
    pub sulfur: f64,
    pub iron: f64,
    pub calcium: f64,
    pub magnesium: f64,
    pub zinc: f64,
    pub boron: f64,
    /// Always [`DATA_QUALITY`].
    pub data_quality: String,
}

/// Phosphorus availability multiplier. Near-neutral soils (pH 6.0-7.0,
/// inclusive at both ends) release the full pool; availability falls off
/// linearly on the acid and alkaline sides.
pub fn ph_factor(ph: f64) -> f64 {
    if ph < 6.0 {
        0.65 + (ph - 5.0) * 0.35
    } else if ph > 7.0 {
        1.0 - (ph - 7.0) * 0.12
    } else {
        1.0
    }
}

/// Fraction of CEC occupied by calcium, banded on pH.
fn ca_saturation(ph: f64) -> f64 {
    if ph >= 7.0 {
        0.75
    } else if ph >= 6.0 {
        0.65
    } else {
        0.50
    }
}

/// Fraction of CEC occupied by magnesium, same pH bands as calcium.
fn mg_saturation(ph: f64) -> f64 {
    if ph >= 7.0 {
        0.15
    } else if ph >= 6.0 {
        0.12
    } else {
        0.08
    }
}

/// Clamp into the band, then round to 2 decimals. A non-finite value
/// collapses to the band floor so nothing unusable can propagate.
fn band(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if !value.is_finite() {
        return lo;
    }
    round2(value.clamp(lo, hi))
}

/// Derive all eight nutrient estimates from one soil record.
pub fn estimate_nutrients(soil: &SoilProperties) -> NutrientEstimate {
    let phosphorus =
        (8.5 * soil.organic_carbon + 0.15 * soil.clay + 3.0) * ph_factor(soil.ph);

    // Potassium pool scales with exchange capacity and clay; coarse sandy
    // profiles leach, hence the 0.7 reduction above 60% sand.
    let mut base_k = soil.cec * 12.5 + soil.clay * 2.8;
    if soil.sand > 60.0 {
        base_k *= 0.7;
    }
    let potassium = base_k + 40.0;

    let sulfur = soil.organic_carbon * 18.0 + soil.nitrogen * 10.0;

    // Iron availability drops as pH rises past neutral and climbs in acid
    // profiles; organic matter chelates a little extra either way.
    let iron = 35.0 - (soil.ph - 6.5) * 10.0 + soil.organic_carbon * 3.0;

    let calcium = soil.cec * ca_saturation(soil.ph) * 200.0;
    let magnesium = soil.cec * mg_saturation(soil.ph) * 120.0;

    let zinc = 2.5 + soil.organic_carbon * 0.8 - (soil.ph - 6.5) * 0.3;
    let boron = 0.8 + soil.organic_carbon * 0.15;

    NutrientEstimate {
        phosphorus: band(phosphorus, PHOSPHORUS_BAND),
        potassium: band(potassium, POTASSIUM_BAND),
        sulfur: band(sulfur, SULFUR_BAND),
        iron: band(iron, IRON_BAND),
        calcium: band(calcium, CALCIUM_BAND),
        magnesium: band(magnesium, MAGNESIUM_BAND),
        zinc: band(zinc, ZINC_BAND),
        boron: band(boron, BORON_BAND),
        data_quality: DATA_QUALITY.to_string(),
    }
}
