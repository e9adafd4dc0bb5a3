//! Fertilizer dosing ladders
//!
//! Each nutrient category is evaluated independently against an ordered
//! tier table; the first tier whose threshold fires supplies the action
//! string. Output order is fixed: nitrogen, phosphorus, potassium, calcium,
//! magnesium, organic matter. Calcium, magnesium and organic-matter items
//! are omitted entirely when levels are adequate.

use crate::{NutrientEstimate, SoilProperties};

/// One rung of a dosing ladder: fires when the measured value is below the
/// threshold.
struct Tier {
    below: f64,
    action: &'static str,
}

const NITROGEN_TIERS: [Tier; 2] = [
    Tier {
        below: 0.12,
        action: "Apply 120 kg/ha urea in 3 split doses (basal, tillering, flowering) to correct low nitrogen",
    },
    Tier {
        below: 0.18,
        action: "Apply 80 kg/ha urea in 2 split doses (basal and top dressing)",
    },
];
const NITROGEN_MAINTENANCE: &str = "Apply 40 kg/ha urea at sowing to maintain nitrogen levels";

const PHOSPHORUS_TIERS: [Tier; 2] = [
    Tier {
        below: 10.0,
        action: "Apply 100 kg/ha single super phosphate (SSP) at sowing to correct low phosphorus",
    },
    Tier {
        below: 20.0,
        action: "Apply 60 kg/ha single super phosphate (SSP) at sowing",
    },
];
const PHOSPHORUS_MAINTENANCE: &str =
    "Apply 30 kg/ha single super phosphate (SSP) to maintain phosphorus levels";

const POTASSIUM_TIERS: [Tier; 2] = [
    Tier {
        below: 100.0,
        action: "Apply 60 kg/ha muriate of potash (MOP) to correct low potassium",
    },
    Tier {
        below: 180.0,
        action: "Apply 40 kg/ha muriate of potash (MOP) at sowing",
    },
];
const POTASSIUM_MAINTENANCE: &str =
    "Apply 20 kg/ha muriate of potash (MOP) to maintain potassium levels";

const MAGNESIUM_TIERS: [Tier; 2] = [
    Tier {
        below: 100.0,
        action: "Apply 30 kg/ha magnesium sulphate to correct low magnesium",
    },
    Tier {
        below: 180.0,
        action: "Apply 15 kg/ha magnesium sulphate with the basal dose",
    },
];

const ORGANIC_MATTER_TIERS: [Tier; 2] = [
    Tier {
        below: 0.5,
        action: "Incorporate 10 t/ha farmyard manure or compost before sowing to rebuild organic matter",
    },
    Tier {
        below: 0.75,
        action: "Incorporate 5 t/ha farmyard manure or compost before sowing",
    },
];

/// Calcium thresholds: strong acidity calls for lime; a short calcium pool
/// at workable pH calls for gypsum instead.
const CALCIUM_LIME_PH: f64 = 5.5;
const CALCIUM_LOW_PPM: f64 = 1000.0;
const CALCIUM_LIME_ACTION: &str =
    "Apply 2 t/ha agricultural lime to correct acidity and replenish calcium";
const CALCIUM_GYPSUM_ACTION: &str =
    "Apply 500 kg/ha gypsum to replenish calcium without shifting pH";

fn ladder(value: f64, tiers: &[Tier], maintenance: Option<&'static str>) -> Option<&'static str> {
    tiers
        .iter()
        .find(|tier| value < tier.below)
        .map(|tier| tier.action)
        .or(maintenance)
}

/// Compose the fertilizer action list for one soil record.
pub fn fertilizer_plan(soil: &SoilProperties, nutrients: &NutrientEstimate) -> Vec<String> {
    let mut plan = Vec::new();

    if let Some(action) = ladder(soil.nitrogen, &NITROGEN_TIERS, Some(NITROGEN_MAINTENANCE)) {
        plan.push(action.to_string());
    }
    if let Some(action) = ladder(
        nutrients.phosphorus,
        &PHOSPHORUS_TIERS,
        Some(PHOSPHORUS_MAINTENANCE),
    ) {
        plan.push(action.to_string());
    }
    if let Some(action) = ladder(
        nutrients.potassium,
        &POTASSIUM_TIERS,
        Some(POTASSIUM_MAINTENANCE),
    ) {
        plan.push(action.to_string());
    }

    if soil.ph < CALCIUM_LIME_PH {
        plan.push(CALCIUM_LIME_ACTION.to_string());
    } else if nutrients.calcium < CALCIUM_LOW_PPM {
        plan.push(CALCIUM_GYPSUM_ACTION.to_string());
    }

    if let Some(action) = ladder(nutrients.magnesium, &MAGNESIUM_TIERS, None) {
        plan.push(action.to_string());
    }
    if let Some(action) = ladder(soil.organic_carbon, &ORGANIC_MATTER_TIERS, None) {
        plan.push(action.to_string());
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate_nutrients;

    fn plan_for(soil: &SoilProperties) -> Vec<String> {
        fertilizer_plan(soil, &estimate_nutrients(soil))
    }

    #[test]
    fn reference_soil_gets_medium_tiers() {
        let plan = plan_for(&SoilProperties::default());

        // nitrogen 0.15 sits in the 2-split tier; phosphorus 11.85 in the
        // 60 kg/ha SSP tier; potassium 297.5 at maintenance.
        assert!(plan[0].contains("80 kg/ha urea in 2 split doses"));
        assert!(plan[1].contains("60 kg/ha single super phosphate"));
        assert!(plan[2].contains("20 kg/ha muriate of potash"));
        // calcium 1950 and magnesium 216 are adequate, organic carbon 0.6
        // still draws the lighter manure dose.
        assert_eq!(plan.len(), 4);
        assert!(plan[3].contains("5 t/ha farmyard manure"));
    }

    #[test]
    fn depleted_soil_draws_corrective_doses() {
        let soil = SoilProperties {
            ph: 5.2,
            organic_carbon: 0.3,
            nitrogen: 0.08,
            clay: 12.0,
            sand: 70.0,
            cec: 4.0,
            ..SoilProperties::default()
        };
        let plan = plan_for(&soil);

        assert!(plan[0].contains("120 kg/ha urea in 3 split doses"));
        assert!(plan.iter().any(|a| a.contains("agricultural lime")));
        assert!(plan.iter().any(|a| a.contains("magnesium sulphate")));
        assert!(plan.iter().any(|a| a.contains("10 t/ha farmyard manure")));
    }

    #[test]
    fn gypsum_fires_on_low_calcium_at_workable_ph() {
        let soil = SoilProperties {
            ph: 6.1,
            cec: 5.0,
            ..SoilProperties::default()
        };
        // calcium = 5.0 * 0.65 * 200 = 650 < 1000
        let plan = plan_for(&soil);
        assert!(plan.iter().any(|a| a.contains("gypsum")));
        assert!(!plan.iter().any(|a| a.contains("agricultural lime")));
    }

    #[test]
    fn adequate_soil_omits_optional_categories() {
        let soil = SoilProperties {
            organic_carbon: 1.2,
            cec: 20.0,
            ..SoilProperties::default()
        };
        let plan = plan_for(&soil);

        // N/P/K always emit a tier; Ca, Mg and organic matter drop out.
        assert_eq!(plan.len(), 3);
        assert!(!plan.iter().any(|a| a.contains("gypsum")));
        assert!(!plan.iter().any(|a| a.contains("magnesium")));
        assert!(!plan.iter().any(|a| a.contains("manure")));
    }

    #[test]
    fn output_order_is_n_p_k_ca_mg_om() {
        let soil = SoilProperties {
            ph: 5.2,
            organic_carbon: 0.3,
            nitrogen: 0.08,
            cec: 4.0,
            ..SoilProperties::default()
        };
        let plan = plan_for(&soil);
        let position = |needle: &str| {
            plan.iter()
                .position(|a| a.contains(needle))
                .unwrap_or(usize::MAX)
        };

        assert!(position("urea") < position("super phosphate"));
        assert!(position("super phosphate") < position("potash"));
        assert!(position("potash") < position("lime"));
        assert!(position("lime") < position("magnesium"));
        assert!(position("magnesium") < position("manure"));
    }
}
