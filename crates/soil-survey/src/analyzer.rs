//! Fertility analysis orchestration
//!
//! Single-pass pipeline: validate the coordinate, fetch-and-normalize the
//! soil record (fallback on any upstream failure), then run the pure
//! derivation stages and assemble the advisory bundle. Coordinate
//! validation is the only way a request can fail; everything after it is a
//! total function, so valid input always yields a complete bundle.

use crate::client::{SurveyClient, SurveyConfig};
use agronomy::{
    confidence_score, estimate_nutrients, fertilizer_plan, management_practices, rank_crops,
    Coordinate, CoordinateError, NutrientEstimate, Recommendations, SoilProperties,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The complete advisory bundle for one coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilityReport {
    pub location: Coordinate,
    pub soil_properties: SoilProperties,
    pub nutrients: NutrientEstimate,
    pub recommendations: Recommendations,
    pub confidence_score: f64,
}

/// Stateless analysis service; holds only the survey client configuration.
pub struct SoilAnalyzer {
    survey: SurveyClient,
}

impl SoilAnalyzer {
    pub fn new(config: SurveyConfig) -> Self {
        Self {
            survey: SurveyClient::new(config),
        }
    }

    /// Run the full pipeline for one coordinate.
    pub async fn analyze(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<FertilityReport, CoordinateError> {
        let location = Coordinate::new(latitude, longitude)?;

        let soil = self.survey.fetch_properties(location).await;
        debug!(ph = soil.ph, cec = soil.cec, clay = soil.clay, "soil record ready");

        let nutrients = estimate_nutrients(&soil);
        debug!(
            phosphorus = nutrients.phosphorus,
            potassium = nutrients.potassium,
            "nutrients estimated"
        );

        let crops = rank_crops(&soil);
        let fertilizers = fertilizer_plan(&soil, &nutrients);
        let management = management_practices(&soil);
        let confidence = confidence_score(&soil.uncertainties);
        debug!(best_crop = %crops.best_crop, confidence, "advisory composed");

        Ok(FertilityReport {
            location,
            soil_properties: soil,
            nutrients,
            recommendations: Recommendations {
                crops,
                fertilizers,
                management_practices: management,
            },
            confidence_score: confidence,
        })
    }
}

impl Default for SoilAnalyzer {
    fn default() -> Self {
        Self::new(SurveyConfig::default())
    }
}
