//! Soil-management practices
//!
//! Condition-triggered advice plus two generic practices that are always
//! part of the bundle. Emission order: pH correction, organic matter,
//! texture, generic practices, light-soil caveat.

use crate::SoilProperties;

const ACID_PH: f64 = 5.5;
const ALKALINE_PH: f64 = 8.0;
const LOW_ORGANIC_CARBON: f64 = 0.5;
const HIGH_SAND: f64 = 70.0;
const HIGH_CLAY: f64 = 50.0;
const LOW_CLAY: f64 = 20.0;

/// Compose the management-practice list for one soil record.
pub fn management_practices(soil: &SoilProperties) -> Vec<String> {
    let mut practices = Vec::new();

    if soil.ph < ACID_PH {
        practices.push(
            "Soil is strongly acidic: apply agricultural lime and retest pH after one season"
                .to_string(),
        );
    } else if soil.ph > ALKALINE_PH {
        practices.push(
            "Soil is alkaline: apply gypsum or elemental sulphur and prefer tolerant varieties"
                .to_string(),
        );
    }

    if soil.organic_carbon < LOW_ORGANIC_CARBON {
        practices.push(
            "Build organic matter through green manuring and incorporation of crop residues"
                .to_string(),
        );
    }

    if soil.sand > HIGH_SAND {
        practices.push(
            "Sandy soil: irrigate little and often, and split fertilizer doses to limit leaching"
                .to_string(),
        );
    } else if soil.clay > HIGH_CLAY {
        practices.push(
            "Heavy clay soil: improve drainage and avoid tillage when the profile is wet"
                .to_string(),
        );
    }

    practices.push("Rotate cereals with legumes to sustain soil fertility".to_string());
    practices
        .push("Use drip or sprinkler irrigation with mulching to conserve soil moisture".to_string());

    if soil.clay < LOW_CLAY {
        practices.push(
            "Light soil holds nutrients poorly: apply nutrients in smaller, more frequent doses"
                .to_string(),
        );
    }

    practices
}
