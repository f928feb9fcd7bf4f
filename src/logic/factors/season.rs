use super::{Factor, ScoringContext};
use crate::models::{CropProfile, Season};

/// Season match, weight 0.10.
pub struct SeasonFactor;

impl Factor for SeasonFactor {
    fn id(&self) -> &'static str {
        "season"
    }

    fn name(&self) -> &'static str {
        "Season match"
    }

    fn weight(&self) -> f64 {
        0.10
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        season_score(crop, ctx.season)
    }
}

pub fn season_score(crop: &CropProfile, season: Season) -> f64 {
    if crop.is_suitable_for_season(season) {
        100.0
    } else {
        50.0
    }
}
