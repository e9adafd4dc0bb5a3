//! Agronomy Derivation Library
//!
//! Pure, deterministic soil-fertility derivations for the advisory pipeline:
//! secondary-nutrient estimation, crop suitability ranking, fertilizer dosing
//! ladders, management practices, and bundle confidence.
//!
//! Every function in this crate is a total function of its inputs: no I/O,
//! no shared state, no randomness. Identical `SoilProperties` always produce
//! identical downstream values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod confidence;
pub mod crops;
pub mod fertilizer;
pub mod nutrients;
pub mod practices;

pub use confidence::confidence_score;
pub use crops::{rank_crops, CropSuitability};
pub use fertilizer::fertilizer_plan;
pub use nutrients::{estimate_nutrients, NutrientEstimate};
pub use practices::management_practices;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, CoordinateError>;

/// A validated GPS coordinate. Construction is the only place range checks
/// happen; everything downstream can assume the fields are in range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Normalized topsoil properties, one record per request.
///
/// Units: `ph` on the 0-14 scale, `organic_carbon` and `nitrogen` in percent,
/// `sand`/`silt`/`clay` in percent, `cec` in cmol/kg, `bulk_density` in
/// g/cm3. `uncertainties` maps property name to the uncertainty magnitude
/// reported by the survey source, scaled to the same units as the mean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilProperties {
    pub ph: f64,
    pub organic_carbon: f64,
    pub nitrogen: f64,
    pub sand: f64,
    pub silt: f64,
    pub clay: f64,
    pub cec: f64,
    pub bulk_density: f64,
    #[serde(default)]
    pub uncertainties: BTreeMap<String, f64>,
}

impl Default for SoilProperties {
    fn default() -> Self {
        Self {
            ph: 6.5,
            organic_carbon: 0.6,
            nitrogen: 0.15,
            sand: 40.0,
            silt: 35.0,
            clay: 25.0,
            cec: 15.0,
            bulk_density: 1.3,
            uncertainties: BTreeMap::new(),
        }
    }
}

impl SoilProperties {
    /// Fixed record substituted when the survey fetch fails entirely.
    /// Carries no uncertainties, so the bundle confidence lands on the
    /// no-data value of 0.70.
    pub fn fallback() -> Self {
        Self {
            organic_carbon: 0.65,
            ..Self::default()
        }
    }
}

/// The advisory bundle attached to every successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub crops: CropSuitability,
    pub fertilizers: Vec<String>,
    pub management_practices: Vec<String>,
}

/// Round to 1 decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
