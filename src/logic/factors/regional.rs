use super::{Factor, ScoringContext};
use crate::models::CropProfile;

/// Suitability assumed for a region missing from a crop's map, or no region.
pub const NEUTRAL_SUITABILITY: f64 = 0.5;

/// Regional suitability, weight 0.15.
pub struct RegionalFactor;

impl Factor for RegionalFactor {
    fn id(&self) -> &'static str {
        "regional"
    }

    fn name(&self) -> &'static str {
        "Regional suitability"
    }

    fn weight(&self) -> f64 {
        0.15
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        regional_score(crop, ctx.region_id)
    }
}

/// The 0-1 suitability value the score is built from.
pub fn regional_suitability(crop: &CropProfile, region_id: Option<&str>) -> f64 {
    region_id
        .and_then(|id| crop.regional_suitability_for(id))
        .unwrap_or(NEUTRAL_SUITABILITY)
}

pub fn regional_score(crop: &CropProfile, region_id: Option<&str>) -> f64 {
    regional_suitability(crop, region_id) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropCatalog;

    #[test]
    fn known_unknown_and_absent_regions() {
        let catalog = CropCatalog::builtin();
        let jowar = catalog.get("JOWAR_01").unwrap();
        assert!((regional_score(jowar, Some("SOLAPUR")) - 92.0).abs() < 1e-9);
        assert_eq!(regional_score(jowar, Some("NAGPUR")), 50.0);
        assert_eq!(regional_score(jowar, None), 50.0);
    }
}
