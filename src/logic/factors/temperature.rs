use super::{Factor, ScoringContext};
use crate::models::{CropProfile, TemperatureBand};

/// Temperature fit, weight 0.25.
///
/// 100 inside the optimal band, decaying linearly to 60 at the tolerance
/// limits, 0 outside them.
pub struct TemperatureFactor;

impl Factor for TemperatureFactor {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Temperature fit"
    }

    fn weight(&self) -> f64 {
        0.25
    }

    fn score(&self, crop: &CropProfile, ctx: &ScoringContext) -> f64 {
        temperature_score(&crop.temperature, ctx.avg_temp)
    }
}

pub fn temperature_score(band: &TemperatureBand, avg_temp: f64) -> f64 {
    if band.is_optimal(avg_temp) {
        return 100.0;
    }
    if !band.is_tolerable(avg_temp) {
        return 0.0;
    }

    let (width, distance) = if avg_temp < band.optimal_min {
        (band.optimal_min - band.min, band.optimal_min - avg_temp)
    } else {
        (band.max - band.optimal_max, avg_temp - band.optimal_max)
    };

    if width > 0.0 {
        100.0 - (distance / width) * 40.0
    } else {
        60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> TemperatureBand {
        TemperatureBand::new(20.0, 25.0, 35.0, 42.0)
    }

    #[test]
    fn optimal_band_scores_full() {
        assert_eq!(temperature_score(&band(), 25.0), 100.0);
        assert_eq!(temperature_score(&band(), 35.0), 100.0);
    }

    #[test]
    fn linear_decay_in_tolerance_band() {
        assert!((temperature_score(&band(), 22.5) - 80.0).abs() < 1e-9);
        assert!((temperature_score(&band(), 20.0) - 60.0).abs() < 1e-9);
        assert!((temperature_score(&band(), 42.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn outside_tolerance_scores_zero() {
        assert_eq!(temperature_score(&band(), 19.9), 0.0);
        assert_eq!(temperature_score(&band(), 43.0), 0.0);
    }

    #[test]
    fn degenerate_sub_band() {
        let flat = TemperatureBand::new(25.0, 25.0, 30.0, 35.0);
        assert_eq!(temperature_score(&flat, 25.0), 100.0);
        let edge = TemperatureBand::new(20.0, 25.0, 30.0, 30.0);
        assert_eq!(temperature_score(&edge, 30.0), 100.0);
    }
}
