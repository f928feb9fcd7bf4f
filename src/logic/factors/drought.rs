use super::{Factor, ScoringContext};
use crate::models::{CropProfile, Tolerance};

/// Drought-tolerance bonus, weight 0.10.
///
/// Spells of four days or fewer carry no risk. Beyond that, tolerant crops
/// keep most of the bonus and sensitive ones lose it.
pub struct DroughtFactor;

impl Factor for DroughtFactor {
    fn id(&self) -> &'static str {
        "drought"
    }

    fn name(&self) -> &'static str {
        "Drought tolerance"
    }

    fn weight(&self) -> f64 {
        0.10
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        drought_score(crop.drought_tolerance, ctx.max_dry_spell)
    }
}

pub fn drought_score(tolerance: Tolerance, max_dry_spell: u32) -> f64 {
    match (max_dry_spell, tolerance) {
        (0..=4, _) => 100.0,
        (5..=7, Tolerance::High) => 100.0,
        (5..=7, Tolerance::Moderate) => 70.0,
        (5..=7, Tolerance::Low) => 40.0,
        (_, Tolerance::High) => 80.0,
        (_, Tolerance::Moderate) => 40.0,
        (_, Tolerance::Low) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_spells_carry_no_penalty() {
        for tolerance in [Tolerance::Low, Tolerance::Moderate, Tolerance::High] {
            assert_eq!(drought_score(tolerance, 4), 100.0);
        }
    }

    #[test]
    fn penalties_grow_with_spell_length() {
        assert_eq!(drought_score(Tolerance::Moderate, 6), 70.0);
        assert_eq!(drought_score(Tolerance::Low, 7), 40.0);
        assert_eq!(drought_score(Tolerance::High, 8), 80.0);
        assert_eq!(drought_score(Tolerance::Moderate, 12), 40.0);
        assert_eq!(drought_score(Tolerance::Low, 8), 0.0);
    }
}
