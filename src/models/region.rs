use super::{Season, SoilProfile, SoilTexture};
use crate::error::{FasalError, Result};
use serde::{Deserialize, Serialize};

/// An agricultural district with its location and typical conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: i32,
    pub climate_zone: String,
    pub typical_soil_textures: Vec<SoilTexture>,
    pub supported_seasons: Vec<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_soil: Option<SoilProfile>,
}

impl RegionProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            elevation_m: 0,
            climate_zone: String::new(),
            typical_soil_textures: Vec::new(),
            supported_seasons: Vec::new(),
            default_soil: None,
        }
    }

    pub fn with_elevation(mut self, elevation_m: i32) -> Self {
        self.elevation_m = elevation_m;
        self
    }

    pub fn with_climate_zone(mut self, zone: impl Into<String>) -> Self {
        self.climate_zone = zone.into();
        self
    }

    pub fn with_textures(mut self, textures: &[SoilTexture]) -> Self {
        self.typical_soil_textures = textures.to_vec();
        self
    }

    pub fn with_seasons(mut self, seasons: &[Season]) -> Self {
        self.supported_seasons = seasons.to_vec();
        self
    }

    pub fn with_default_soil(mut self, soil: SoilProfile) -> Self {
        self.default_soil = Some(soil);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(FasalError::invalid("region id must not be empty"));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(FasalError::invalid(format!(
                "region {}: coordinates ({}, {}) out of range",
                self.id, self.latitude, self.longitude
            )));
        }
        if let Some(ref soil) = self.default_soil {
            soil.validate()?;
        }
        Ok(())
    }
}
