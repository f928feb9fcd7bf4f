use super::factors::{
    available_water, default_factors, regional_suitability, Factor, ScoringContext,
};
use super::outlook::{daily_rainfall_with_fallback, round_to};
use crate::catalog::{CropCatalog, DEFAULT_MIN_SOIL_SCORE};
use crate::error::{FasalError, Result};
use crate::logic::soil;
use crate::models::{
    CropProfile, DerivedSeries, FactorScore, Recommendation, RiskFlag, Season, SoilProfile,
    Tolerance,
};
use std::sync::Arc;

/// Regional threshold applied when a request names a region.
pub const REGION_FILTER_THRESHOLD: f64 = 0.5;

/// What the caller wants recommendations for
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub season: Season,
    pub region_id: Option<String>,
    pub soil: Option<SoilProfile>,
    pub irrigation_available: bool,
    pub planning_days: u32,
}

impl RecommendationRequest {
    pub fn new(season: Season) -> Self {
        Self {
            season,
            region_id: None,
            soil: None,
            irrigation_available: true,
            planning_days: super::outlook::DEFAULT_PLANNING_DAYS,
        }
    }

    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    pub fn with_soil(mut self, soil: SoilProfile) -> Self {
        self.soil = Some(soil);
        self
    }

    pub fn with_irrigation(mut self, available: bool) -> Self {
        self.irrigation_available = available;
        self
    }

    pub fn with_planning_days(mut self, days: u32) -> Self {
        self.planning_days = days;
        self
    }
}

pub struct RecommendationEngine {
    catalog: Arc<CropCatalog>,
    factors: Vec<Box<dyn Factor>>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self {
            catalog,
            factors: default_factors(),
        }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn list_factors(&self) -> Vec<(&'static str, &'static str, f64)> {
        self.factors
            .iter()
            .map(|f| (f.id(), f.name(), f.weight()))
            .collect()
    }

    /// Weighted total in [0, 100] and the per-factor breakdown.
    pub fn score_crop(&self, crop: &CropProfile, ctx: &ScoringContext) -> (f64, Vec<FactorScore>) {
        let breakdown: Vec<FactorScore> = self
            .factors
            .iter()
            .map(|f| FactorScore::new(f.id(), f.name(), f.weight(), f.score(crop, ctx)))
            .collect();

        let total: f64 = breakdown.iter().map(FactorScore::contribution).sum();

        tracing::debug!(
            "{}: {}",
            crop.id,
            breakdown
                .iter()
                .map(|f| format!("{}={:.1}", f.id, f.score))
                .collect::<Vec<_>>()
                .join(", ")
        );

        (total.clamp(0.0, 100.0), breakdown)
    }

    /// Rank the catalog's crops for the request, best first.
    ///
    /// An empty list is a valid answer when every crop is filtered out.
    pub fn recommend(
        &self,
        weather: &DerivedSeries,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>> {
        if request.planning_days == 0 {
            return Err(FasalError::invalid("planning_days must be positive"));
        }
        weather.validate()?;
        if let Some(ref soil) = request.soil {
            soil.validate()?;
        }

        tracing::info!(
            "Generating recommendations for season={}, region={}",
            request.season,
            request.region_id.as_deref().unwrap_or("-")
        );

        let avg_temp = weather.mean_temp();
        let expected_rainfall =
            daily_rainfall_with_fallback(weather) * request.planning_days as f64;
        let max_dry_spell = weather.max_dry_spell();

        let mut crops = self.catalog.by_season(request.season);
        tracing::info!("Found {} crops for {} season", crops.len(), request.season);

        if let Some(ref region_id) = request.region_id {
            crops.retain(|c| c.is_suitable_for_region(region_id, REGION_FILTER_THRESHOLD));
            tracing::info!("Filtered to {} crops suitable for {}", crops.len(), region_id);
        }

        if let Some(ref soil) = request.soil {
            crops = self
                .catalog
                .filter_by_soil(crops, soil, DEFAULT_MIN_SOIL_SCORE);
            tracing::info!("Filtered to {} crops compatible with soil", crops.len());
        }

        let ctx = ScoringContext {
            avg_temp,
            expected_rainfall_mm: expected_rainfall,
            max_dry_spell,
            season: request.season,
            region_id: request.region_id.as_deref(),
            soil: request.soil.as_ref(),
            irrigation_available: request.irrigation_available,
        };
        let available = available_water(expected_rainfall, request.irrigation_available);

        let mut recommendations: Vec<Recommendation> = crops
            .into_iter()
            .map(|crop| {
                let (total, breakdown) = self.score_crop(crop, &ctx);
                let risks = risk_flags(crop, max_dry_spell, available);
                Recommendation {
                    crop_id: crop.id.clone(),
                    crop: crop.common_name.clone(),
                    suitability_score: round_to(total, 2),
                    expected_rainfall_mm: round_to(expected_rainfall, 1),
                    water_required_mm: crop.water_requirement_mm,
                    irrigation_needed_mm: round_to(
                        (crop.water_requirement_mm - expected_rainfall).max(0.0),
                        1,
                    ),
                    growth_duration_days: crop.duration_days,
                    risk_note: risk_note(&risks),
                    risks,
                    drought_tolerance: crop.drought_tolerance,
                    regional_suitability: regional_suitability(crop, ctx.region_id),
                    breakdown,
                    amendments: request
                        .soil
                        .as_ref()
                        .map(|s| soil::suggest_amendments(crop, s))
                        .unwrap_or_default(),
                }
            })
            .collect();

        // sort_by is stable, so ties keep catalog order
        recommendations.sort_by(|a, b| b.suitability_score.total_cmp(&a.suitability_score));

        tracing::info!("Generated {} recommendations", recommendations.len());
        Ok(recommendations)
    }
}

/// Risks for a crop given the horizon's longest dry spell and available water.
///
/// The deficit check compares against the crop's unadjusted requirement.
pub fn risk_flags(crop: &CropProfile, max_dry_spell: u32, available_mm: f64) -> Vec<RiskFlag> {
    let mut risks = Vec::new();

    if max_dry_spell > 7 {
        match crop.drought_tolerance {
            Tolerance::Low => risks.push(RiskFlag::HighDrought),
            Tolerance::Moderate => risks.push(RiskFlag::ModerateDrought),
            Tolerance::High => {}
        }
    }

    let ratio = if crop.water_requirement_mm > 0.0 {
        available_mm / crop.water_requirement_mm
    } else {
        1.0
    };
    if ratio < 0.8 {
        risks.push(RiskFlag::WaterDeficit);
    }

    risks
}

pub fn risk_note(risks: &[RiskFlag]) -> String {
    match risks {
        [] => "Low risk".to_string(),
        [only] => only.as_str().to_string(),
        many => format!(
            "Multiple risks: {}",
            many.iter()
                .map(RiskFlag::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionCatalog;
    use crate::logic::features::derive_features;
    use crate::models::{DailyWeather, Level, SoilTexture, WeatherSeries};
    use chrono::NaiveDate;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(CropCatalog::builtin()))
    }

    fn weather(days: usize, temp_avg: f64, rain: f64) -> DerivedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let series = (0..days)
            .map(|i| {
                DailyWeather::new(
                    start + chrono::Duration::days(i as i64),
                    temp_avg + 5.0,
                    temp_avg - 5.0,
                    rain,
                )
            })
            .collect();
        derive_features(&WeatherSeries::new(series).unwrap(), 10.0)
    }

    fn dry_weather(days: usize, temp_avg: f64) -> DerivedSeries {
        weather(days, temp_avg, 0.0)
    }

    #[test]
    fn pune_kharif_ranks_millets_first() {
        let pune_soil = RegionCatalog::builtin()
            .get("PUNE")
            .and_then(|r| r.default_soil.clone())
            .unwrap();
        let request = RecommendationRequest::new(Season::Kharif)
            .with_region("PUNE")
            .with_soil(pune_soil)
            .with_irrigation(true)
            .with_planning_days(90);

        let recs = engine().recommend(&weather(90, 27.0, 8.0), &request).unwrap();
        let top5: Vec<&str> = recs.iter().take(5).map(|r| r.crop_id.as_str()).collect();
        assert!(top5.contains(&"BAJRA_01"), "{:?}", top5);
        assert!(top5.contains(&"JOWAR_01"), "{:?}", top5);

        let jowar = recs.iter().find(|r| r.crop_id == "JOWAR_01").unwrap();
        assert_eq!(jowar.suitability_score, 98.2);
        assert_eq!(jowar.expected_rainfall_mm, 720.0);
        assert_eq!(jowar.irrigation_needed_mm, 0.0);
        assert_eq!(jowar.risk_note, "Low risk");
        assert_eq!(jowar.regional_suitability, 0.88);
        assert_eq!(jowar.breakdown.len(), 6);
    }

    #[test]
    fn results_are_sorted_and_bounded() {
        let request = RecommendationRequest::new(Season::Kharif).with_irrigation(false);
        let recs = engine().recommend(&dry_weather(10, 38.0), &request).unwrap();
        assert_eq!(recs.len(), 15);
        assert!(recs
            .windows(2)
            .all(|w| w[0].suitability_score >= w[1].suitability_score));
        assert!(recs
            .iter()
            .all(|r| (0.0..=100.0).contains(&r.suitability_score)));
    }

    #[test]
    fn alkaline_soil_filters_everything() {
        let soil = SoilProfile::new(SoilTexture::Loam, 9.5, Level::Medium).unwrap();
        let catalog = CropCatalog::builtin();
        for crop in catalog.all() {
            assert_eq!(soil::ph_score(crop, soil.ph), 0.0);
        }

        let request = RecommendationRequest::new(Season::Kharif).with_soil(soil);
        let recs = engine().recommend(&weather(10, 27.0, 5.0), &request).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn zaid_has_no_builtin_crops() {
        let request = RecommendationRequest::new(Season::Zaid);
        let recs = engine().recommend(&weather(10, 30.0, 1.0), &request).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn zero_planning_days_is_rejected() {
        let request = RecommendationRequest::new(Season::Kharif).with_planning_days(0);
        let result = engine().recommend(&weather(10, 27.0, 5.0), &request);
        assert!(matches!(result, Err(FasalError::InvalidInput(_))));
    }

    #[test]
    fn four_day_series_is_rejected() {
        let mut short = weather(10, 27.0, 5.0);
        short.days.truncate(4);
        let request = RecommendationRequest::new(Season::Kharif);
        let result = engine().recommend(&short, &request);
        assert!(matches!(result, Err(FasalError::InvalidInput(_))));
    }

    #[test]
    fn breakdown_adds_up_to_total() {
        let request = RecommendationRequest::new(Season::Rabi).with_region("NASHIK");
        let recs = engine().recommend(&weather(12, 24.0, 3.0), &request).unwrap();
        for rec in &recs {
            let sum: f64 = rec.breakdown.iter().map(FactorScore::contribution).sum();
            assert!((round_to(sum, 2) - rec.suitability_score).abs() < 1e-6);
        }
    }

    #[test]
    fn unknown_region_scores_neutral_but_filters_by_threshold() {
        // No crop lists NAGPUR, so the region filter removes every crop
        let request = RecommendationRequest::new(Season::Kharif).with_region("NAGPUR");
        let recs = engine().recommend(&weather(10, 27.0, 5.0), &request).unwrap();
        assert!(recs.is_empty());

        let request = RecommendationRequest::new(Season::Kharif);
        let recs = engine().recommend(&weather(10, 27.0, 5.0), &request).unwrap();
        assert!(recs.iter().all(|r| r.regional_suitability == 0.5));
    }

    #[test]
    fn more_rain_never_lowers_a_score() {
        let engine = engine();
        let request = RecommendationRequest::new(Season::Kharif)
            .with_region("SOLAPUR")
            .with_irrigation(false);
        let dry = engine.recommend(&weather(10, 28.0, 0.6), &request).unwrap();
        let wet = engine.recommend(&weather(10, 28.0, 6.0), &request).unwrap();
        for rec in &dry {
            let better = wet.iter().find(|w| w.crop_id == rec.crop_id).unwrap();
            assert!(better.suitability_score >= rec.suitability_score);
        }
    }

    #[test]
    fn dry_spell_risk_notes() {
        let catalog = CropCatalog::builtin();
        let tomato = catalog.get("TOMATO_01").unwrap(); // Low tolerance, 600mm
        let moong = catalog.get("MOONG_01").unwrap(); // Moderate, 350mm
        let bajra = catalog.get("BAJRA_01").unwrap(); // High, 400mm

        assert_eq!(
            risk_note(&risk_flags(tomato, 10, 200.0)),
            "Multiple risks: High drought risk, Water deficit risk"
        );
        assert_eq!(risk_note(&risk_flags(moong, 8, 400.0)), "Moderate drought risk");
        assert_eq!(risk_note(&risk_flags(bajra, 12, 400.0)), "Low risk");
        assert_eq!(risk_note(&risk_flags(bajra, 3, 300.0)), "Water deficit risk");
    }

    #[test]
    fn shortfall_ignores_irrigation_buffer() {
        let request = RecommendationRequest::new(Season::Kharif)
            .with_irrigation(true)
            .with_planning_days(100);
        let recs = engine().recommend(&weather(10, 27.0, 3.0), &request).unwrap();
        let tomato = recs.iter().find(|r| r.crop_id == "TOMATO_01").unwrap();
        assert_eq!(tomato.expected_rainfall_mm, 300.0);
        assert_eq!(tomato.irrigation_needed_mm, 300.0);
        // 350mm available against 600mm
        assert!(tomato.risks.contains(&RiskFlag::WaterDeficit));
    }

    #[test]
    fn amendments_follow_the_soil() {
        let soil = SoilProfile::new(SoilTexture::Clay, 7.0, Level::Low).unwrap();
        let request = RecommendationRequest::new(Season::Kharif).with_soil(soil);
        let recs = engine().recommend(&weather(10, 27.0, 5.0), &request).unwrap();
        let jowar = recs.iter().find(|r| r.crop_id == "JOWAR_01").unwrap();
        assert_eq!(jowar.amendments.len(), 1);
        assert!(jowar.amendments[0].contains("organic matter"));

        let without = engine()
            .recommend(&weather(10, 27.0, 5.0), &RecommendationRequest::new(Season::Kharif))
            .unwrap();
        assert!(without.iter().all(|r| r.amendments.is_empty()));
    }

    #[test]
    fn engine_lists_six_factors() {
        let factors = engine().list_factors();
        assert_eq!(factors.len(), 6);
        assert_eq!(factors[0].0, "temperature");
    }
}
