use super::crop_data::builtin_crops;
use crate::error::{FasalError, Result};
use crate::logic::soil;
use crate::models::{CropProfile, Season, SoilProfile};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Default threshold for `by_region`.
pub const DEFAULT_REGION_THRESHOLD: f64 = 0.3;
/// Default minimum soil score for `filter_by_soil`.
pub const DEFAULT_MIN_SOIL_SCORE: f64 = 40.0;

/// Read-only collection of crop profiles, validated at construction.
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    crops: Vec<CropProfile>,
}

impl CropCatalog {
    pub fn new(crops: Vec<CropProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for crop in &crops {
            crop.validate()?;
            if !seen.insert(crop.id.as_str()) {
                return Err(FasalError::invalid(format!("duplicate crop id {}", crop.id)));
            }
        }
        tracing::debug!("Crop catalog loaded with {} crops", crops.len());
        Ok(Self { crops })
    }

    /// The fifteen built-in short-duration crops.
    pub fn builtin() -> Self {
        Self {
            crops: builtin_crops(),
        }
    }

    /// Load a catalog from `{"crops": [...]}` JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&content)?;
        Self::new(file.crops)
    }

    pub fn get(&self, id: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn by_season(&self, season: Season) -> Vec<&CropProfile> {
        self.crops
            .iter()
            .filter(|c| c.is_suitable_for_season(season))
            .collect()
    }

    pub fn by_region(&self, region_id: &str, threshold: f64) -> Vec<&CropProfile> {
        self.crops
            .iter()
            .filter(|c| c.is_suitable_for_region(region_id, threshold))
            .collect()
    }

    /// Keep crops whose soil compatibility score reaches `min_score`.
    pub fn filter_by_soil<'a>(
        &self,
        crops: Vec<&'a CropProfile>,
        soil_profile: &SoilProfile,
        min_score: f64,
    ) -> Vec<&'a CropProfile> {
        crops
            .into_iter()
            .filter(|c| soil::score(c, soil_profile) >= min_score)
            .collect()
    }

    /// Soil score and amendments per crop, best first.
    pub fn with_soil_scores<'a>(
        &self,
        crops: Vec<&'a CropProfile>,
        soil_profile: &SoilProfile,
    ) -> Vec<(&'a CropProfile, f64, Vec<String>)> {
        let mut scored: Vec<_> = crops
            .into_iter()
            .map(|c| {
                (
                    c,
                    soil::score(c, soil_profile),
                    soil::suggest_amendments(c, soil_profile),
                )
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Crops whose typical duration lies in `[min_days, max_days]`.
    pub fn short_duration(&self, min_days: u32, max_days: u32) -> Vec<&CropProfile> {
        self.crops
            .iter()
            .filter(|c| c.is_short_duration(min_days, max_days))
            .collect()
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, SoilTexture};

    #[test]
    fn builtin_crops_are_valid() {
        let builtin = CropCatalog::builtin();
        assert_eq!(builtin.len(), 15);
        let rebuilt = CropCatalog::new(builtin.all().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 15);
    }

    #[test]
    fn every_builtin_crop_covers_all_districts() {
        let catalog = CropCatalog::builtin();
        for crop in catalog.all() {
            assert_eq!(crop.regional_suitability.len(), 10, "{}", crop.id);
            assert!(crop
                .regional_suitability
                .values()
                .all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let bajra = CropCatalog::builtin().get("BAJRA_01").unwrap().clone();
        let result = CropCatalog::new(vec![bajra.clone(), bajra]);
        assert!(matches!(result, Err(FasalError::InvalidInput(_))));
    }

    #[test]
    fn rejects_unordered_temperature_band() {
        let mut bajra = CropCatalog::builtin().get("BAJRA_01").unwrap().clone();
        bajra.temperature.optimal_min = 50.0;
        assert!(CropCatalog::new(vec![bajra]).is_err());
    }

    #[test]
    fn season_query() {
        let catalog = CropCatalog::builtin();
        let kharif = catalog.by_season(Season::Kharif);
        assert_eq!(kharif.len(), 15);

        let rabi: Vec<_> = catalog
            .by_season(Season::Rabi)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert!(rabi.contains(&"JOWAR_01"));
        assert!(!rabi.contains(&"BAJRA_01"));

        assert!(catalog.by_season(Season::Zaid).is_empty());
    }

    #[test]
    fn region_query_uses_success_list_or_threshold() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.by_region("PUNE", 0.3).len(), 15);

        let strict: Vec<_> = catalog
            .by_region("KOLHAPUR", 0.85)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        // RAGI reaches 0.85; SUNFLOWER lists KOLHAPUR as a proven region
        assert!(strict.contains(&"RAGI_01"));
        assert!(strict.contains(&"SUNFLOWER_01"));
        assert!(!strict.contains(&"BAJRA_01"));

        assert!(catalog.by_region("UNKNOWN", 0.3).is_empty());
    }

    #[test]
    fn soil_filter_at_zero_keeps_everything() {
        let catalog = CropCatalog::builtin();
        let soil = SoilProfile::new(SoilTexture::Sandy, 9.5, Level::Low).unwrap();
        let all: Vec<_> = catalog.all().iter().collect();
        assert_eq!(catalog.filter_by_soil(all, &soil, 0.0).len(), 15);
    }

    #[test]
    fn soil_filter_rejects_alkaline_soil() {
        let catalog = CropCatalog::builtin();
        let soil = SoilProfile::new(SoilTexture::Loam, 9.5, Level::Medium).unwrap();
        let all: Vec<_> = catalog.all().iter().collect();
        assert!(catalog.filter_by_soil(all, &soil, 40.0).is_empty());
    }

    #[test]
    fn soil_scores_sorted_descending() {
        let catalog = CropCatalog::builtin();
        let soil = SoilProfile::generic();
        let scored = catalog.with_soil_scores(catalog.all().iter().collect(), &soil);
        assert_eq!(scored.len(), 15);
        assert!(scored.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn short_duration_bounds_are_inclusive() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.short_duration(70, 90).len(), 15);
        let seventy: Vec<_> = catalog
            .short_duration(70, 70)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(seventy, vec!["FOXTAIL_01", "MOONG_01", "OKRA_01"]);
    }

    #[test]
    fn loads_catalog_from_json() {
        let dir = std::env::temp_dir().join(format!("fasal-crops-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("crops.json");
        let crops = vec![CropCatalog::builtin().get("JOWAR_01").unwrap().clone()];
        let json = serde_json::json!({ "crops": crops });
        std::fs::write(&path, json.to_string()).unwrap();

        let catalog = CropCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("JOWAR_01").is_some());

        std::fs::remove_dir_all(&dir).ok();
    }
}
