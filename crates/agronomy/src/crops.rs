//! Crop suitability scoring
//!
//! A fixed catalog of 8 staple crops, each with a tight and a loose
//! requirement band over {ph, organic_carbon, clay, sand}. A tight match
//! scores 0.9, a loose match 0.7, anything else stays out of the result.
//! The bands are declarative table entries so each rule can be read and
//! tested on its own.

use crate::SoilProperties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TIGHT_SCORE: f64 = 0.9;
pub const LOOSE_SCORE: f64 = 0.7;

/// Entries at or above this score count as suitable.
pub const SUITABILITY_CUTOFF: f64 = 0.7;

/// Reported when no catalog entry qualifies; the advisory never returns an
/// empty best crop.
pub const DEFAULT_CROP: &str = "Rice";

/// Ranked crop suitability for one soil record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSuitability {
    pub best_crop: String,
    /// Score >= 0.7, descending; catalog order breaks ties.
    pub suitable_crops: Vec<String>,
    pub suitability_scores: BTreeMap<String, f64>,
}

/// Inclusive requirement band. `None` places no requirement on that input.
#[derive(Debug, Clone, Copy)]
struct SoilBand {
    ph: (f64, f64),
    min_organic_carbon: Option<f64>,
    clay: Option<(f64, f64)>,
    sand: Option<(f64, f64)>,
}

impl SoilBand {
    fn matches(&self, soil: &SoilProperties) -> bool {
        let (ph_lo, ph_hi) = self.ph;
        if soil.ph < ph_lo || soil.ph > ph_hi {
            return false;
        }
        if let Some(min_oc) = self.min_organic_carbon {
            if soil.organic_carbon < min_oc {
                return false;
            }
        }
        if let Some((lo, hi)) = self.clay {
            if soil.clay < lo || soil.clay > hi {
                return false;
            }
        }
        if let Some((lo, hi)) = self.sand {
            if soil.sand < lo || soil.sand > hi {
                return false;
            }
        }
        true
    }
}

struct CropRule {
    name: &'static str,
    tight: SoilBand,
    loose: SoilBand,
}

/// Declaration order is the tie-break order in the ranked output.
const CATALOG: [CropRule; 8] = [
    CropRule {
        name: "Rice",
        tight: SoilBand {
            ph: (5.5, 7.0),
            min_organic_carbon: Some(0.5),
            clay: Some((30.0, 100.0)),
            sand: None,
        },
        loose: SoilBand {
            ph: (5.0, 8.0),
            min_organic_carbon: None,
            clay: Some((20.0, 100.0)),
            sand: None,
        },
    },
    CropRule {
        name: "Wheat",
        tight: SoilBand {
            ph: (6.0, 7.5),
            min_organic_carbon: Some(0.5),
            clay: Some((20.0, 45.0)),
            sand: None,
        },
        loose: SoilBand {
            ph: (5.5, 8.0),
            min_organic_carbon: None,
            clay: Some((10.0, 60.0)),
            sand: None,
        },
    },
    CropRule {
        name: "Maize",
        tight: SoilBand {
            ph: (5.8, 7.0),
            min_organic_carbon: Some(0.6),
            clay: None,
            sand: Some((0.0, 60.0)),
        },
        loose: SoilBand {
            ph: (5.5, 7.5),
            min_organic_carbon: None,
            clay: None,
            sand: Some((0.0, 70.0)),
        },
    },
    CropRule {
        name: "Cotton",
        tight: SoilBand {
            ph: (6.5, 8.0),
            min_organic_carbon: None,
            clay: Some((30.0, 60.0)),
            sand: None,
        },
        loose: SoilBand {
            ph: (6.0, 8.4),
            min_organic_carbon: None,
            clay: Some((20.0, 70.0)),
            sand: None,
        },
    },
    CropRule {
        name: "Sugarcane",
        tight: SoilBand {
            ph: (6.0, 7.5),
            min_organic_carbon: Some(0.8),
            clay: None,
            sand: None,
        },
        loose: SoilBand {
            ph: (5.5, 8.0),
            min_organic_carbon: Some(0.5),
            clay: None,
            sand: None,
        },
    },
    CropRule {
        name: "Soybean",
        tight: SoilBand {
            ph: (6.0, 7.0),
            min_organic_carbon: Some(0.6),
            clay: Some((20.0, 40.0)),
            sand: None,
        },
        loose: SoilBand {
            ph: (5.8, 7.5),
            min_organic_carbon: None,
            clay: Some((10.0, 50.0)),
            sand: None,
        },
    },
    CropRule {
        name: "Groundnut",
        tight: SoilBand {
            ph: (6.0, 7.0),
            min_organic_carbon: None,
            clay: Some((0.0, 30.0)),
            sand: Some((40.0, 80.0)),
        },
        loose: SoilBand {
            ph: (5.5, 7.5),
            min_organic_carbon: None,
            clay: None,
            sand: Some((30.0, 85.0)),
        },
    },
    CropRule {
        name: "Pearl Millet",
        tight: SoilBand {
            ph: (6.0, 7.5),
            min_organic_carbon: None,
            clay: None,
            sand: Some((50.0, 100.0)),
        },
        loose: SoilBand {
            ph: (5.5, 8.5),
            min_organic_carbon: None,
            clay: None,
            sand: Some((30.0, 100.0)),
        },
    },
];

/// Score the catalog against one soil record and rank the qualifiers.
pub fn rank_crops(soil: &SoilProperties) -> CropSuitability {
    let mut scored: Vec<(&'static str, f64)> = Vec::new();
    for rule in &CATALOG {
        if rule.tight.matches(soil) {
            scored.push((rule.name, TIGHT_SCORE));
        } else if rule.loose.matches(soil) {
            scored.push((rule.name, LOOSE_SCORE));
        }
    }

    // Stable sort keeps catalog order within a score tier.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let suitable_crops: Vec<String> = scored
        .iter()
        .filter(|(_, score)| *score >= SUITABILITY_CUTOFF)
        .map(|(name, _)| (*name).to_string())
        .collect();

    let best_crop = scored
        .first()
        .map(|(name, _)| (*name).to_string())
        .unwrap_or_else(|| DEFAULT_CROP.to_string());

    CropSuitability {
        best_crop,
        suitable_crops,
        suitability_scores: scored
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect(),
    }
}
