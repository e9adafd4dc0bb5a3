//! Soil Survey Integration
//!
//! Fetches raw soil-survey layers for a coordinate, normalizes them into
//! [`agronomy::SoilProperties`], and orchestrates the full fertility
//! analysis. The fetch degrades to a fixed fallback record on any failure,
//! so the analysis pipeline always has usable input.

use serde::Deserialize;

pub mod analyzer;
pub mod client;
pub mod normalize;

pub use analyzer::{FertilityReport, SoilAnalyzer};
pub use client::{SurveyClient, SurveyConfig, SurveyError};

/// Wire model of the survey response. Every level is defaulted so any
/// subset of the expected shape still deserializes; missing pieces fall
/// back to the documented property defaults during normalization.
#[derive(Debug, Default, Deserialize)]
pub struct SurveyResponse {
    #[serde(default)]
    pub properties: SurveyProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct SurveyProperties {
    #[serde(default)]
    pub layers: Vec<SurveyLayer>,
}

/// One property layer, e.g. `phh2o`, with its sampled depth bands.
#[derive(Debug, Default, Deserialize)]
pub struct SurveyLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub depths: Vec<DepthBand>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepthBand {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub values: DepthValues,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepthValues {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub uncertainty: Option<f64>,
}
