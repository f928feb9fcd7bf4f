use thiserror::Error;

#[derive(Error, Debug)]
pub enum FasalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Weather data unavailable: {0}")]
    WeatherUnavailable(String),

    #[error(
        "No region within {max_distance_km:.0} km of ({latitude:.4}, {longitude:.4}); \
         nearest is {nearest} at {distance_km:.1} km"
    )]
    NoRegionInRange {
        latitude: f64,
        longitude: f64,
        nearest: String,
        distance_km: f64,
        max_distance_km: f64,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FasalError {
    /// Stable machine-readable code, one per error kind.
    pub fn code(&self) -> &'static str {
        match self {
            FasalError::InvalidInput(_) => "invalid_input",
            FasalError::WeatherUnavailable(_) => "weather_unavailable",
            FasalError::NoRegionInRange { .. } => "no_region_in_range",
            FasalError::NotFound(_) => "not_found",
            FasalError::Config(_) => "config",
            FasalError::Database(_) => "database",
            FasalError::Io(_) => "io",
            FasalError::Json(_) => "json",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            FasalError::InvalidInput(_) => 2,
            FasalError::WeatherUnavailable(_) => 3,
            FasalError::NoRegionInRange { .. } => 4,
            FasalError::NotFound(_) => 5,
            FasalError::Config(_) => 6,
            FasalError::Database(_) => 7,
            FasalError::Io(_) => 8,
            FasalError::Json(_) => 9,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        FasalError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FasalError>;
