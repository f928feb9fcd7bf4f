use super::{Factor, ScoringContext};
use crate::logic::soil;
use crate::models::CropProfile;

/// Sub-score used when the caller supplies no soil profile.
pub const DEFAULT_SOIL_SCORE: f64 = 70.0;

/// Soil compatibility, weight 0.15.
pub struct SoilFactor;

impl Factor for SoilFactor {
    fn id(&self) -> &'static str {
        "soil"
    }

    fn name(&self) -> &'static str {
        "Soil compatibility"
    }

    fn weight(&self) -> f64 {
        0.15
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        ctx.soil
            .map(|s| soil::score(crop, s))
            .unwrap_or(DEFAULT_SOIL_SCORE)
    }
}
