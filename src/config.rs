use crate::error::{FasalError, Result};
use crate::models::{IrrigationLevel, Level, Location, SoilProfile, SoilTexture};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub regions: RegionsConfig,
    #[serde(default)]
    pub crops: CropsConfig,
}

/// The farm the dashboard and `recommend` default to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub region_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub irrigation: IrrigationLevel,
    #[serde(default = "default_planning_days")]
    pub planning_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<SoilProfile>,
}

fn default_planning_days() -> u32 {
    90
}

impl FarmConfig {
    /// Coordinates win over the region id when both are configured.
    pub fn location(&self) -> Option<Location> {
        match (self.latitude, self.longitude, self.region_id.as_ref()) {
            (Some(latitude), Some(longitude), _) => Some(Location::Coordinates {
                latitude,
                longitude,
            }),
            (_, _, Some(id)) => Some(Location::Region(id.clone())),
            _ => None,
        }
    }
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            region_id: Some("PUNE".into()),
            latitude: None,
            longitude: None,
            irrigation: IrrigationLevel::default(),
            planning_days: default_planning_days(),
            soil: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".into()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".into()
}

fn default_forecast_days() -> u32 {
    16
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            archive_url: default_archive_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegionsConfig {
    /// Defaults to `regions.json` in the data directory.
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
}

fn default_max_distance_km() -> f64 {
    100.0
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            max_distance_km: default_max_distance_km(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CropsConfig {
    /// Custom crop catalog; the built-in crops are used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FasalError::Config(format!(
                "Config file not found at {:?}. Run `fasal init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FasalError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Load the config if one exists, otherwise fall back to defaults.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FasalError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref soil) = self.farm.soil {
            soil.validate()?;
        }
        if self.farm.latitude.is_some() != self.farm.longitude.is_some() {
            return Err(FasalError::Config(
                "farm.latitude and farm.longitude must be set together".into(),
            ));
        }
        if self.regions.max_distance_km <= 0.0 {
            return Err(FasalError::Config(
                "regions.max_distance_km must be positive".into(),
            ));
        }
        if self.weather.forecast_days == 0 {
            return Err(FasalError::Config(
                "weather.forecast_days must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("fasal").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/fasal/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FasalError::Config("Cannot determine config directory".into()))?
            .join("fasal");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(region_ids: &[String]) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up fasal!");
        println!();

        // --- Farm location ---
        println!("Farm location");
        let mut choices: Vec<String> = region_ids.to_vec();
        choices.push("Enter coordinates".into());
        let picked = Select::new()
            .with_prompt("  Region")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(input_error)?;

        let (region_id, latitude, longitude) = if picked < region_ids.len() {
            (Some(region_ids[picked].clone()), None, None)
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .default(18.52)
                .interact_text()
                .map_err(input_error)?;
            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .default(73.86)
                .interact_text()
                .map_err(input_error)?;
            (None, Some(latitude), Some(longitude))
        };

        let irrigation_levels = ["None", "Limited", "Full"];
        let irrigation = Select::new()
            .with_prompt("  Irrigation")
            .items(&irrigation_levels)
            .default(1)
            .interact()
            .map_err(input_error)?;
        let irrigation =
            IrrigationLevel::from_str(irrigation_levels[irrigation]).unwrap_or_default();

        let planning_days: u32 = Input::new()
            .with_prompt("  Planning horizon (70-120 days)")
            .default(90)
            .validate_with(|days: &u32| {
                if (70..=120).contains(days) {
                    Ok(())
                } else {
                    Err("must be between 70 and 120")
                }
            })
            .interact_text()
            .map_err(input_error)?;

        println!();

        // --- Soil (optional) ---
        println!("Soil (leave texture blank to use the region default)");
        let texture: String = Input::new()
            .with_prompt("  Texture (Clay, Loam, Sandy, Clay-Loam, Sandy-Loam)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let soil = if texture.is_empty() {
            None
        } else {
            let texture = SoilTexture::from_str(&texture)
                .ok_or_else(|| FasalError::Config(format!("Unknown soil texture '{}'", texture)))?;
            let ph: f64 = Input::new()
                .with_prompt("  pH")
                .default(7.0)
                .interact_text()
                .map_err(input_error)?;
            let organic: String = Input::new()
                .with_prompt("  Organic matter (Low, Medium, High)")
                .default("Medium".into())
                .interact_text()
                .map_err(input_error)?;
            let organic = Level::from_str(&organic).unwrap_or(Level::Medium);
            Some(SoilProfile::new(texture, ph, organic)?)
        };

        println!();

        let config = Config {
            farm: FarmConfig {
                region_id,
                latitude,
                longitude,
                irrigation,
                planning_days,
                soil,
            },
            ..Config::default()
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FasalError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# fasal configuration\n# Generated by `fasal init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("FASAL_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| FasalError::Config("Cannot determine data directory".into()))?
            .join("fasal");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("fasal.db"))
    }

    /// Region catalog file: the configured path or `regions.json` in the data directory.
    pub fn regions_path(&self, data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        match self.regions.catalog_path {
            Some(ref p) => Ok(p.clone()),
            None => Ok(Self::data_dir(data_dir_override)?.join("regions.json")),
        }
    }
}

fn input_error(e: dialoguer::Error) -> FasalError {
    FasalError::Config(format!("Input error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.farm.region_id.as_deref(), Some("PUNE"));
        assert_eq!(config.farm.planning_days, 90);
        assert_eq!(config.farm.irrigation, IrrigationLevel::Limited);
        assert_eq!(config.regions.max_distance_km, 100.0);
        assert_eq!(config.weather.forecast_days, 16);
        assert!(config.weather.forecast_url.contains("api.open-meteo.com"));
    }

    #[test]
    fn parses_full_farm_section() {
        let yaml = r#"
farm:
  region_id: SOLAPUR
  irrigation: Full
  planning_days: 100
  soil:
    texture: Clay-Loam
    ph: 7.4
    organic_matter: Low
regions:
  max_distance_km: 75
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.farm.region_id.as_deref(), Some("SOLAPUR"));
        assert_eq!(config.farm.irrigation, IrrigationLevel::Full);
        let soil = config.farm.soil.unwrap();
        assert_eq!(soil.texture, SoilTexture::ClayLoam);
        assert_eq!(soil.organic_matter, Level::Low);
        assert_eq!(config.regions.max_distance_km, 75.0);
    }

    #[test]
    fn rejects_invalid_soil_ph() {
        let yaml = "farm:\n  soil:\n    texture: Loam\n    ph: 15.0\n    organic_matter: Medium\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn rejects_half_coordinates() {
        let yaml = "farm:\n  latitude: 18.5\n";
        assert!(matches!(
            Config::from_yaml(yaml),
            Err(FasalError::Config(_))
        ));
    }

    #[test]
    fn farm_location_prefers_coordinates() {
        let config = Config::from_yaml("farm:\n  latitude: 17.7\n  longitude: 75.9\n").unwrap();
        assert_eq!(
            config.farm.location(),
            Some(Location::Coordinates {
                latitude: 17.7,
                longitude: 75.9
            })
        );

        let config = Config::default();
        assert_eq!(config.farm.location(), Some(Location::Region("PUNE".into())));

        let config = Config::from_yaml("farm:\n  region_id: null\n").unwrap();
        assert_eq!(config.farm.location(), None);
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("FASAL_TEST_REGION_ID", "LATUR");
        let config = Config::from_yaml("farm:\n  region_id: ${FASAL_TEST_REGION_ID}\n").unwrap();
        assert_eq!(config.farm.region_id.as_deref(), Some("LATUR"));
    }
}
