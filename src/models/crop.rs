use super::{Level, Season, SoilTexture};
use crate::error::{FasalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tolerance {
    Low,
    Moderate,
    High,
}

impl Tolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tolerance::Low => "Low",
            Tolerance::Moderate => "Moderate",
            Tolerance::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Tolerance::Low),
            "moderate" | "medium" => Some(Tolerance::Moderate),
            "high" => Some(Tolerance::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demand {
    Low,
    Moderate,
    High,
}

impl Demand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Demand::Low => "Low",
            Demand::Moderate => "Moderate",
            Demand::High => "High",
        }
    }
}

impl std::fmt::Display for Demand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Temperature tolerance band in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    pub min: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub max: f64,
}

impl TemperatureBand {
    pub fn new(min: f64, optimal_min: f64, optimal_max: f64, max: f64) -> Self {
        Self {
            min,
            optimal_min,
            optimal_max,
            max,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.optimal_min && self.optimal_min <= self.optimal_max && self.optimal_max <= self.max
    }

    pub fn is_optimal(&self, temp: f64) -> bool {
        self.optimal_min <= temp && temp <= self.optimal_max
    }

    pub fn is_tolerable(&self, temp: f64) -> bool {
        self.min <= temp && temp <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhRange {
    pub min: f64,
    pub max: f64,
}

impl PhRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ph: f64) -> bool {
        self.min <= ph && ph <= self.max
    }

    /// Inner band with 20% of the width trimmed from each end.
    pub fn optimal(&self) -> PhRange {
        let margin = (self.max - self.min) * 0.2;
        PhRange {
            min: self.min + margin,
            max: self.max - margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientDemand {
    pub n: Level,
    pub p: Level,
    pub k: Level,
}

impl NutrientDemand {
    pub fn new(n: Level, p: Level, k: Level) -> Self {
        Self { n, p, k }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: String,
    pub common_name: String,
    pub scientific_name: String,
    pub duration_days: u32,
    pub duration_range: (u32, u32),
    pub temperature: TemperatureBand,
    pub water_requirement_mm: f64,
    pub drought_tolerance: Tolerance,
    pub waterlogging_tolerance: Tolerance,
    pub ph_range: PhRange,
    pub suitable_textures: Vec<SoilTexture>,
    pub nutrients: NutrientDemand,
    pub regional_suitability: BTreeMap<String, f64>,
    pub successful_regions: Vec<String>,
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub varieties: Vec<String>,
    #[serde(default)]
    pub typical_yield_kg_per_ha: u32,
    #[serde(default = "default_market_demand")]
    pub market_demand: Demand,
}

fn default_market_demand() -> Demand {
    Demand::Moderate
}

impl CropProfile {
    /// Check the catalog invariants for this profile.
    pub fn validate(&self) -> Result<()> {
        let fail = |what: &str| Err(FasalError::invalid(format!("crop {}: {}", self.id, what)));

        if self.id.trim().is_empty() {
            return Err(FasalError::invalid("crop id must not be empty"));
        }
        if !self.temperature.is_ordered() {
            return fail("temperature band must satisfy min <= optimal_min <= optimal_max <= max");
        }
        if self.ph_range.min > self.ph_range.max {
            return fail("pH min exceeds pH max");
        }
        if !(0.0..=14.0).contains(&self.ph_range.min) || !(0.0..=14.0).contains(&self.ph_range.max) {
            return fail("pH band outside 0-14");
        }
        let (lo, hi) = self.duration_range;
        if lo > hi {
            return fail("duration range is inverted");
        }
        if !self.water_requirement_mm.is_finite() || self.water_requirement_mm < 0.0 {
            return fail("water requirement must be a non-negative number");
        }
        if let Some((region, value)) = self
            .regional_suitability
            .iter()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return fail(&format!("suitability {} for {} outside 0-1", value, region));
        }
        if self.seasons.is_empty() {
            return fail("at least one season is required");
        }
        Ok(())
    }

    pub fn is_suitable_for_region(&self, region_id: &str, threshold: f64) -> bool {
        self.successful_regions.iter().any(|r| r == region_id)
            || self.regional_suitability_for(region_id).unwrap_or(0.0) >= threshold
    }

    pub fn regional_suitability_for(&self, region_id: &str) -> Option<f64> {
        self.regional_suitability.get(region_id).copied()
    }

    pub fn is_suitable_for_season(&self, season: Season) -> bool {
        self.seasons.contains(&season)
    }

    pub fn is_suitable_for_soil_ph(&self, ph: f64) -> bool {
        self.ph_range.contains(ph)
    }

    pub fn is_suitable_for_texture(&self, texture: SoilTexture) -> bool {
        self.suitable_textures.contains(&texture)
    }

    pub fn is_short_duration(&self, min_days: u32, max_days: u32) -> bool {
        min_days <= self.duration_days && self.duration_days <= max_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CropProfile {
        CropProfile {
            id: "TEST_01".into(),
            common_name: "Test Millet".into(),
            scientific_name: "Testus milletus".into(),
            duration_days: 75,
            duration_range: (70, 80),
            temperature: TemperatureBand::new(20.0, 25.0, 35.0, 42.0),
            water_requirement_mm: 400.0,
            drought_tolerance: Tolerance::High,
            waterlogging_tolerance: Tolerance::Low,
            ph_range: PhRange::new(6.0, 8.0),
            suitable_textures: vec![SoilTexture::Sandy, SoilTexture::Loam],
            nutrients: NutrientDemand::new(Level::Medium, Level::Medium, Level::Medium),
            regional_suitability: [("PUNE".to_string(), 0.85), ("LATUR".to_string(), 0.2)]
                .into_iter()
                .collect(),
            successful_regions: vec!["SOLAPUR".into()],
            seasons: vec![Season::Kharif],
            varieties: vec![],
            typical_yield_kg_per_ha: 1500,
            market_demand: Demand::High,
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn unordered_temperature_band_fails() {
        let mut crop = sample();
        crop.temperature = TemperatureBand::new(20.0, 36.0, 35.0, 42.0);
        assert!(crop.validate().is_err());
    }

    #[test]
    fn inverted_ph_fails() {
        let mut crop = sample();
        crop.ph_range = PhRange::new(8.0, 6.0);
        assert!(crop.validate().is_err());
    }

    #[test]
    fn suitability_outside_unit_interval_fails() {
        let mut crop = sample();
        crop.regional_suitability.insert("NASHIK".into(), 1.2);
        assert!(crop.validate().is_err());
    }

    #[test]
    fn region_suitability_threshold_and_override() {
        let crop = sample();
        assert!(crop.is_suitable_for_region("PUNE", 0.5));
        assert!(!crop.is_suitable_for_region("LATUR", 0.3));
        // proven success wins even without a suitability entry
        assert!(crop.is_suitable_for_region("SOLAPUR", 0.99));
        assert!(!crop.is_suitable_for_region("NOWHERE", 0.0 + f64::EPSILON));
    }

    #[test]
    fn optimal_ph_band_is_trimmed() {
        let band = PhRange::new(6.0, 8.0).optimal();
        assert!((band.min - 6.4).abs() < 1e-9);
        assert!((band.max - 7.6).abs() < 1e-9);
    }

    #[test]
    fn short_duration_is_inclusive() {
        let crop = sample();
        assert!(crop.is_short_duration(70, 90));
        assert!(crop.is_short_duration(75, 75));
        assert!(!crop.is_short_duration(76, 90));
    }
}
