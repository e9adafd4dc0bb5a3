//! Raw layer normalization
//!
//! Maps survey wire layers onto a canonical [`SoilProperties`] record. The
//! survey source encodes each property as a scaled integer; the table below
//! carries the divisor and rounding for each one. This stage is total: any
//! property missing from the input keeps its documented default, and a
//! completely empty response normalizes to the full default record.

use crate::SurveyResponse;
use agronomy::{round1, round2, SoilProperties};

/// Per-property wire conversion.
struct Conversion {
    /// Layer name used by the survey source.
    wire: &'static str,
    /// Canonical property name, also the key in `uncertainties`.
    field: &'static str,
    divisor: f64,
    round: fn(f64) -> f64,
}

const CONVERSIONS: [Conversion; 8] = [
    Conversion {
        wire: "phh2o",
        field: "ph",
        divisor: 10.0,
        round: round1,
    },
    Conversion {
        wire: "soc",
        field: "organic_carbon",
        divisor: 10.0,
        round: round2,
    },
    Conversion {
        wire: "nitrogen",
        field: "nitrogen",
        divisor: 100.0,
        round: round2,
    },
    Conversion {
        wire: "sand",
        field: "sand",
        divisor: 10.0,
        round: round1,
    },
    Conversion {
        wire: "silt",
        field: "silt",
        divisor: 10.0,
        round: round1,
    },
    Conversion {
        wire: "clay",
        field: "clay",
        divisor: 10.0,
        round: round1,
    },
    Conversion {
        wire: "cec",
        field: "cec",
        divisor: 10.0,
        round: round1,
    },
    Conversion {
        wire: "bdod",
        field: "bulk_density",
        divisor: 100.0,
        round: round2,
    },
];

fn set_field(soil: &mut SoilProperties, field: &str, value: f64) {
    match field {
        "ph" => soil.ph = value,
        "organic_carbon" => soil.organic_carbon = value,
        "nitrogen" => soil.nitrogen = value,
        "sand" => soil.sand = value,
        "silt" => soil.silt = value,
        "clay" => soil.clay = value,
        "cec" => soil.cec = value,
        "bulk_density" => soil.bulk_density = value,
        _ => {}
    }
}

/// Normalize a parsed survey response into a soil record. Reads the first
/// depth band's mean per property; the uncertainty, when present, is scaled
/// by the same divisor as the mean.
pub fn normalize(response: &SurveyResponse) -> SoilProperties {
    let mut soil = SoilProperties::default();

    for conversion in &CONVERSIONS {
        let Some(layer) = response
            .properties
            .layers
            .iter()
            .find(|layer| layer.name == conversion.wire)
        else {
            continue;
        };
        let Some(band) = layer.depths.first() else {
            continue;
        };
        let Some(mean) = band.values.mean else {
            continue;
        };

        set_field(&mut soil, conversion.field, (conversion.round)(mean / conversion.divisor));

        if let Some(uncertainty) = band.values.uncertainty {
            soil.uncertainties.insert(
                conversion.field.to_string(),
                round2(uncertainty / conversion.divisor),
            );
        }
    }

    soil
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SurveyResponse {
        serde_json::from_str(json).expect("test payload should parse")
    }

    #[test]
    fn full_payload_converts_every_property() {
        let response = parse(
            r#"{
                "properties": {
                    "layers": [
                        {"name": "phh2o", "depths": [{"label": "0-5cm", "values": {"mean": 65, "uncertainty": 3}}]},
                        {"name": "soc", "depths": [{"label": "0-5cm", "values": {"mean": 12, "uncertainty": 4}}]},
                        {"name": "nitrogen", "depths": [{"label": "0-5cm", "values": {"mean": 21, "uncertainty": 6}}]},
                        {"name": "sand", "depths": [{"label": "0-5cm", "values": {"mean": 550, "uncertainty": 40}}]},
                        {"name": "silt", "depths": [{"label": "0-5cm", "values": {"mean": 250, "uncertainty": 30}}]},
                        {"name": "clay", "depths": [{"label": "0-5cm", "values": {"mean": 200, "uncertainty": 25}}]},
                        {"name": "cec", "depths": [{"label": "0-5cm", "values": {"mean": 182, "uncertainty": 20}}]},
                        {"name": "bdod", "depths": [{"label": "0-5cm", "values": {"mean": 142, "uncertainty": 9}}]}
                    ]
                }
            }"#,
        );

        let soil = normalize(&response);
        assert_eq!(soil.ph, 6.5);
        assert_eq!(soil.organic_carbon, 1.2);
        assert_eq!(soil.nitrogen, 0.21);
        assert_eq!(soil.sand, 55.0);
        assert_eq!(soil.silt, 25.0);
        assert_eq!(soil.clay, 20.0);
        assert_eq!(soil.cec, 18.2);
        assert_eq!(soil.bulk_density, 1.42);

        assert_eq!(soil.uncertainties["ph"], 0.3);
        assert_eq!(soil.uncertainties["organic_carbon"], 0.4);
        assert_eq!(soil.uncertainties["nitrogen"], 0.06);
        assert_eq!(soil.uncertainties["sand"], 4.0);
        assert_eq!(soil.uncertainties.len(), 8);
    }

    #[test]
    fn first_depth_band_wins() {
        let response = parse(
            r#"{
                "properties": {
                    "layers": [
                        {"name": "phh2o", "depths": [
                            {"label": "0-5cm", "values": {"mean": 58}},
                            {"label": "5-15cm", "values": {"mean": 72}}
                        ]}
                    ]
                }
            }"#,
        );
        assert_eq!(normalize(&response).ph, 5.8);
    }

    #[test]
    fn missing_properties_keep_defaults() {
        let response = parse(
            r#"{
                "properties": {
                    "layers": [
                        {"name": "phh2o", "depths": [{"values": {"mean": 52, "uncertainty": 2}}]}
                    ]
                }
            }"#,
        );
        let soil = normalize(&response);
        let defaults = SoilProperties::default();

        assert_eq!(soil.ph, 5.2);
        assert_eq!(soil.organic_carbon, defaults.organic_carbon);
        assert_eq!(soil.cec, defaults.cec);
        assert_eq!(soil.uncertainties.len(), 1);
    }

    #[test]
    fn layer_without_mean_keeps_default_and_records_no_uncertainty() {
        let response = parse(
            r#"{
                "properties": {
                    "layers": [
                        {"name": "cec", "depths": [{"values": {"uncertainty": 12}}]}
                    ]
                }
            }"#,
        );
        let soil = normalize(&response);
        assert_eq!(soil.cec, SoilProperties::default().cec);
        assert!(soil.uncertainties.is_empty());
    }

    #[test]
    fn unknown_layers_are_ignored() {
        let response = parse(
            r#"{
                "properties": {
                    "layers": [
                        {"name": "ocd", "depths": [{"values": {"mean": 999}}]}
                    ]
                }
            }"#,
        );
        assert_eq!(normalize(&response), SoilProperties::default());
    }

    #[test]
    fn empty_payload_normalizes_to_defaults() {
        assert_eq!(normalize(&parse("{}")), SoilProperties::default());
        assert_eq!(
            normalize(&parse(r#"{"properties": {}}"#)),
            SoilProperties::default()
        );
        assert_eq!(
            normalize(&parse(r#"{"properties": {"layers": []}}"#)),
            SoilProperties::default()
        );
    }
}
