use super::engine::{RecommendationEngine, RecommendationRequest};
use super::features::{derive_features, DEFAULT_BASE_TEMP};
use super::outlook::estimate_outlook;
use super::season::{
    detect_season, guidance_text, is_transition, planting_window, PlantingWindow,
    DEFAULT_TRANSITION_DAYS,
};
use crate::catalog::RegionCatalog;
use crate::datasources::WeatherSource;
use crate::error::{FasalError, Result};
use crate::models::{
    IrrigationLevel, Location, Outlook, Recommendation, RegionProfile, Season, SoilProfile,
    WeatherSeries, MIN_SERIES_DAYS,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Planning horizons accepted from farmers, in days.
pub const PLANNING_DAYS_RANGE: RangeInclusive<u32> = 70..=120;

/// A farmer's question
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub location: Location,
    pub season: Option<Season>,
    pub soil: Option<SoilProfile>,
    pub irrigation: IrrigationLevel,
    pub planning_days: u32,
}

impl AdviceRequest {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            season: None,
            soil: None,
            irrigation: IrrigationLevel::default(),
            planning_days: super::outlook::DEFAULT_PLANNING_DAYS,
        }
    }

    pub fn with_season(mut self, season: Option<Season>) -> Self {
        self.season = season;
        self
    }

    pub fn with_soil(mut self, soil: Option<SoilProfile>) -> Self {
        self.soil = soil;
        self
    }

    pub fn with_irrigation(mut self, irrigation: IrrigationLevel) -> Self {
        self.irrigation = irrigation;
        self
    }

    pub fn with_planning_days(mut self, days: u32) -> Self {
        self.planning_days = days;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoilSource {
    Provided,
    Regional,
    Generic,
}

impl SoilSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilSource::Provided => "provided",
            SoilSource::Regional => "regional default",
            SoilSource::Generic => "generic default",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub region_id: String,
    pub region_name: String,
    /// Distance to the matched region when the request gave coordinates.
    pub distance_km: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub season: Season,
    pub season_detected: bool,
    pub is_transition: bool,
    pub next_season: Option<Season>,
    pub guidance: String,
    pub planting_window: Option<PlantingWindow>,
    pub soil: SoilProfile,
    pub soil_source: SoilSource,
    pub irrigation: IrrigationLevel,
    pub weather_days: usize,
    pub outlook: Outlook,
    pub total_analyzed: usize,
    pub recommendations: Vec<Recommendation>,
}

impl Advice {
    pub fn top(&self, n: usize) -> &[Recommendation] {
        &self.recommendations[..n.min(self.recommendations.len())]
    }
}

/// Runs the whole pipeline for a location: region, season, soil, weather,
/// features, outlook and ranking.
pub struct Advisor<W: WeatherSource> {
    engine: RecommendationEngine,
    regions: Arc<RegionCatalog>,
    source: W,
    forecast_days: u32,
    max_distance_km: f64,
}

impl<W: WeatherSource> Advisor<W> {
    pub fn new(
        engine: RecommendationEngine,
        regions: Arc<RegionCatalog>,
        source: W,
        forecast_days: u32,
        max_distance_km: f64,
    ) -> Self {
        Self {
            engine,
            regions,
            source,
            forecast_days,
            max_distance_km,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn regions(&self) -> &RegionCatalog {
        &self.regions
    }

    pub fn source(&self) -> &W {
        &self.source
    }

    fn resolve_region(&self, location: &Location) -> Result<(&RegionProfile, f64, f64, Option<f64>)> {
        match location {
            Location::Region(id) => {
                let region = self
                    .regions
                    .get(id)
                    .ok_or_else(|| FasalError::NotFound(format!("region {}", id)))?;
                Ok((region, region.latitude, region.longitude, None))
            }
            Location::Coordinates {
                latitude,
                longitude,
            } => {
                if !(-90.0..=90.0).contains(latitude) || !(-180.0..=180.0).contains(longitude) {
                    return Err(FasalError::invalid(format!(
                        "coordinates ({}, {}) out of range",
                        latitude, longitude
                    )));
                }
                let (region, distance) =
                    self.regions
                        .find_nearest(*latitude, *longitude, self.max_distance_km)?;
                Ok((region, *latitude, *longitude, Some(distance)))
            }
        }
    }

    pub async fn advise(&self, request: AdviceRequest, today: NaiveDate) -> Result<Advice> {
        if !PLANNING_DAYS_RANGE.contains(&request.planning_days) {
            return Err(FasalError::invalid(format!(
                "planning_days {} must be between {} and {}",
                request.planning_days,
                PLANNING_DAYS_RANGE.start(),
                PLANNING_DAYS_RANGE.end()
            )));
        }
        if let Some(ref soil) = request.soil {
            soil.validate()?;
        }

        let (region, latitude, longitude, distance_km) = self.resolve_region(&request.location)?;
        tracing::info!("Advising for region {} ({:.4}, {:.4})", region.id, latitude, longitude);

        let detected = detect_season(today);
        let season = request.season.unwrap_or(detected);
        let (transition, next_season) = if season == detected {
            is_transition(today, DEFAULT_TRANSITION_DAYS)
        } else {
            (false, None)
        };

        let (soil, soil_source) = match (request.soil, region.default_soil.clone()) {
            (Some(soil), _) => (soil, SoilSource::Provided),
            (None, Some(soil)) => (soil, SoilSource::Regional),
            (None, None) => (SoilProfile::generic(), SoilSource::Generic),
        };

        let days = self
            .source
            .fetch_daily(latitude, longitude, self.forecast_days)
            .await?;
        if days.len() < MIN_SERIES_DAYS {
            return Err(FasalError::WeatherUnavailable(format!(
                "weather source returned {} days; at least {} are needed",
                days.len(),
                MIN_SERIES_DAYS
            )));
        }
        let series = WeatherSeries::new(days)?;

        let derived = derive_features(&series, DEFAULT_BASE_TEMP);
        let outlook = estimate_outlook(&derived, request.planning_days)?;

        let engine_request = RecommendationRequest::new(season)
            .with_region(region.id.clone())
            .with_soil(soil.clone())
            .with_irrigation(request.irrigation.is_available())
            .with_planning_days(request.planning_days);
        let recommendations = self.engine.recommend(&derived, &engine_request)?;

        Ok(Advice {
            region_id: region.id.clone(),
            region_name: region.name.clone(),
            distance_km,
            latitude,
            longitude,
            date: today,
            season,
            season_detected: request.season.is_none(),
            is_transition: transition,
            next_season,
            guidance: guidance_text(season, transition, next_season),
            planting_window: planting_window(season, today.year()),
            soil,
            soil_source,
            irrigation: request.irrigation,
            weather_days: series.len(),
            outlook,
            total_analyzed: recommendations.len(),
            recommendations,
        })
    }
}
