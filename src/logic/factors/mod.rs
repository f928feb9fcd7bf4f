pub mod drought;
pub mod regional;
pub mod season;
pub mod soil;
pub mod temperature;
pub mod water;

pub use drought::{drought_score, DroughtFactor};
pub use regional::{regional_score, regional_suitability, RegionalFactor};
pub use season::{season_score, SeasonFactor};
pub use soil::{SoilFactor, DEFAULT_SOIL_SCORE};
pub use temperature::{temperature_score, TemperatureFactor};
pub use water::{available_water, water_score, WaterFactor, IRRIGATION_BUFFER_MM};

use crate::models::{CropProfile, Season, SoilProfile};

/// Conditions a crop is scored against.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub avg_temp: f64,
    pub expected_rainfall_mm: f64,
    pub max_dry_spell: u32,
    pub season: Season,
    pub region_id: Option<&'a str>,
    pub soil: Option<&'a SoilProfile>,
    pub irrigation_available: bool,
}

/// One weighted component of the suitability score
pub trait Factor: Send + Sync {
    /// Unique identifier for this factor
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Share of the total score; the default factors sum to 1.0
    fn weight(&self) -> f64;

    /// Sub-score in [0, 100]
    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64;
}

pub fn default_factors() -> Vec<Box<dyn Factor>> {
    vec![
        Box::new(TemperatureFactor),
        Box::new(WaterFactor),
        Box::new(SoilFactor),
        Box::new(RegionalFactor),
        Box::new(SeasonFactor),
        Box::new(DroughtFactor),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let total: f64 = default_factors().iter().map(|f| f.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn factor_ids_are_unique() {
        let factors = default_factors();
        let mut ids: Vec<_> = factors.iter().map(|f| f.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), factors.len());
    }
}
