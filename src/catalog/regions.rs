use crate::error::{FasalError, Result};
use crate::models::{Drainage, Level, RegionProfile, Season, SoilProfile, SoilTexture};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Search radius used when the caller does not pass one.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Serialize, Deserialize)]
struct RegionsFile {
    regions: Vec<RegionProfile>,
}

/// Region profiles backed by a JSON file.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: Vec<RegionProfile>,
    path: Option<PathBuf>,
}

impl RegionCatalog {
    /// Load regions from `path`, seeding and writing the built-in districts when
    /// the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Region file {} not found, creating defaults", path.display());
            let catalog = Self {
                regions: default_regions(),
                path: Some(path.to_path_buf()),
            };
            catalog.save()?;
            return Ok(catalog);
        }

        let content = std::fs::read_to_string(path)?;
        let file: RegionsFile = serde_json::from_str(&content).map_err(|e| {
            FasalError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        for region in &file.regions {
            region.validate()?;
        }

        tracing::info!("Loaded {} regions from {}", file.regions.len(), path.display());
        Ok(Self {
            regions: file.regions,
            path: Some(path.to_path_buf()),
        })
    }

    /// Catalog without a backing file.
    pub fn in_memory(regions: Vec<RegionProfile>) -> Self {
        Self {
            regions,
            path: None,
        }
    }

    pub fn builtin() -> Self {
        Self::in_memory(default_regions())
    }

    pub fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = RegionsFile {
            regions: self.regions.clone(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        tracing::debug!("Saved {} regions to {}", self.regions.len(), path.display());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RegionProfile> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[RegionProfile] {
        &self.regions
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Add a region or replace the one with the same id, then persist.
    pub fn upsert(&mut self, region: RegionProfile) -> Result<()> {
        region.validate()?;
        match self.regions.iter_mut().find(|r| r.id == region.id) {
            Some(existing) => {
                tracing::info!("Updating region {}", region.id);
                *existing = region;
            }
            None => {
                tracing::info!("Adding region {}", region.id);
                self.regions.push(region);
            }
        }
        self.save()
    }

    /// Closest region to the coordinates, if it lies within `max_distance_km`.
    pub fn find_nearest(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance_km: f64,
    ) -> Result<(&RegionProfile, f64)> {
        let nearest = self
            .regions
            .iter()
            .map(|r| (r, haversine_km(latitude, longitude, r.latitude, r.longitude)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((region, distance)) if distance <= max_distance_km => {
                tracing::debug!("Nearest region {} at {:.1} km", region.id, distance);
                Ok((region, distance))
            }
            Some((region, distance)) => {
                tracing::warn!(
                    "Nearest region {} is {:.1} km away, beyond {} km",
                    region.id,
                    distance,
                    max_distance_km
                );
                Err(FasalError::NoRegionInRange {
                    latitude,
                    longitude,
                    nearest: region.id.clone(),
                    distance_km: distance,
                    max_distance_km,
                })
            }
            None => Err(FasalError::NoRegionInRange {
                latitude,
                longitude,
                nearest: "none".to_string(),
                distance_km: f64::INFINITY,
                max_distance_km,
            }),
        }
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn district(
    id: &str,
    coords: (f64, f64),
    elevation_m: i32,
    climate_zone: &str,
    textures: &[SoilTexture],
    soil: (SoilTexture, f64, Level, Drainage),
) -> RegionProfile {
    let name = format!("{}{} District", &id[..1], id[1..].to_lowercase());
    RegionProfile::new(id, name, coords.0, coords.1)
        .with_elevation(elevation_m)
        .with_climate_zone(climate_zone)
        .with_textures(textures)
        .with_seasons(&[Season::Kharif, Season::Rabi])
        .with_default_soil(SoilProfile {
            texture: soil.0,
            ph: soil.1,
            organic_matter: soil.2,
            drainage: Some(soil.3),
        })
}

/// The ten Maharashtra districts shipped with the application.
pub fn default_regions() -> Vec<RegionProfile> {
    use Drainage::{Good, Medium as Fair, Poor};
    use Level::{High, Low, Medium};
    use SoilTexture::{Clay, ClayLoam, Loam, Sandy, SandyLoam};

    vec![
        district("PUNE", (18.5204, 73.8567), 560, "Semi-Arid", &[ClayLoam, SandyLoam], (ClayLoam, 7.2, Medium, Fair)),
        district("SOLAPUR", (17.6599, 75.9064), 458, "Semi-Arid", &[Clay, Sandy], (Clay, 7.8, Low, Poor)),
        district("NASHIK", (19.9975, 73.7898), 565, "Sub-Humid", &[ClayLoam, Loam], (Loam, 6.8, Medium, Good)),
        district("AHMEDNAGAR", (19.0948, 74.7480), 649, "Semi-Arid", &[Clay, ClayLoam], (ClayLoam, 7.5, Medium, Fair)),
        district("AURANGABAD", (19.8762, 75.3433), 568, "Semi-Arid", &[Clay, SandyLoam], (Clay, 7.6, Low, Fair)),
        district("JALGAON", (21.0077, 75.5626), 209, "Sub-Humid", &[ClayLoam, Loam], (ClayLoam, 7.0, Medium, Good)),
        district("SANGLI", (16.8524, 74.5815), 549, "Semi-Arid", &[Clay, Sandy], (Sandy, 7.4, Low, Good)),
        district("KOLHAPUR", (16.7050, 74.2433), 569, "Sub-Humid", &[ClayLoam, Loam], (Loam, 6.5, High, Good)),
        district("SATARA", (17.6805, 74.0183), 625, "Sub-Humid", &[ClayLoam, SandyLoam], (SandyLoam, 6.8, Medium, Good)),
        district("LATUR", (18.3983, 76.5604), 636, "Semi-Arid", &[Clay, Sandy], (Clay, 7.9, Low, Poor)),
    ]
}
