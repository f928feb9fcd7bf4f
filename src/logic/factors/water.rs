use super::{Factor, ScoringContext};
use crate::logic::season::season_water_adjustment;
use crate::models::{CropProfile, Season, Tolerance};

/// Extra water assumed when irrigation is available, mm.
pub const IRRIGATION_BUFFER_MM: f64 = 50.0;

/// Water balance, weight 0.25.
pub struct WaterFactor;

impl Factor for WaterFactor {
    fn id(&self) -> &'static str {
        "water"
    }

    fn name(&self) -> &'static str {
        "Water balance"
    }

    fn weight(&self) -> f64 {
        0.25
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        water_score(
            crop,
            ctx.expected_rainfall_mm,
            ctx.irrigation_available,
            ctx.season,
        )
    }
}

pub fn available_water(expected_rainfall_mm: f64, irrigation_available: bool) -> f64 {
    if irrigation_available {
        expected_rainfall_mm + IRRIGATION_BUFFER_MM
    } else {
        expected_rainfall_mm
    }
}

/// Score the season-adjusted requirement against available water.
pub fn water_score(
    crop: &CropProfile,
    expected_rainfall_mm: f64,
    irrigation_available: bool,
    season: Season,
) -> f64 {
    let requirement = season_water_adjustment(season, crop.water_requirement_mm);
    let available = available_water(expected_rainfall_mm, irrigation_available);
    let ratio = if requirement > 0.0 {
        available / requirement
    } else {
        1.0
    };

    let tolerance = crop.drought_tolerance;
    if ratio >= 1.0 {
        100.0
    } else if ratio >= 0.8 {
        match tolerance {
            Tolerance::High => 90.0,
            Tolerance::Moderate => 75.0,
            Tolerance::Low => 60.0,
        }
    } else if ratio >= 0.6 {
        match tolerance {
            Tolerance::High => 75.0,
            Tolerance::Moderate => 50.0,
            Tolerance::Low => 30.0,
        }
    } else {
        match tolerance {
            Tolerance::High => 50.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CropCatalog;

    #[test]
    fn deficit_bands_by_tolerance() {
        let catalog = CropCatalog::builtin();
        // BAJRA: 400mm, High drought tolerance; Kharif requirement 340mm
        let bajra = catalog.get("BAJRA_01").unwrap();
        assert_eq!(water_score(bajra, 350.0, false, Season::Kharif), 100.0);
        assert_eq!(water_score(bajra, 290.0, false, Season::Kharif), 90.0);
        assert_eq!(water_score(bajra, 220.0, false, Season::Kharif), 75.0);
        assert_eq!(water_score(bajra, 100.0, false, Season::Kharif), 50.0);

        // TOMATO: 600mm, Low tolerance; Rabi requirement 570mm
        let tomato = catalog.get("TOMATO_01").unwrap();
        assert_eq!(water_score(tomato, 500.0, false, Season::Rabi), 60.0);
        assert_eq!(water_score(tomato, 400.0, false, Season::Rabi), 30.0);
        assert_eq!(water_score(tomato, 100.0, false, Season::Rabi), 0.0);
    }

    #[test]
    fn irrigation_adds_buffer() {
        let catalog = CropCatalog::builtin();
        let bajra = catalog.get("BAJRA_01").unwrap();
        assert_eq!(water_score(bajra, 300.0, false, Season::Kharif), 90.0);
        assert_eq!(water_score(bajra, 300.0, true, Season::Kharif), 100.0);
        assert_eq!(available_water(300.0, true), 350.0);
    }

    #[test]
    fn zero_requirement_is_satisfied() {
        let mut crop = CropCatalog::builtin().get("MOONG_01").unwrap().clone();
        crop.water_requirement_mm = 0.0;
        assert_eq!(water_score(&crop, 0.0, false, Season::Zaid), 100.0);
    }

    #[test]
    fn score_never_drops_as_rainfall_rises() {
        let catalog = CropCatalog::builtin();
        for crop in catalog.all() {
            for &season in crate::models::Season::all() {
                let mut last = 0.0;
                for step in 0..=80 {
                    let rain = step as f64 * 10.0;
                    let s = water_score(crop, rain, false, season);
                    assert!(s >= last, "{} {} at {}mm", crop.id, season, rain);
                    last = s;
                }
            }
        }
    }
}
