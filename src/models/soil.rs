use crate::error::{FasalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilTexture {
    Clay,
    Loam,
    Sandy,
    #[serde(rename = "Clay-Loam")]
    ClayLoam,
    #[serde(rename = "Sandy-Loam")]
    SandyLoam,
}

impl SoilTexture {
    pub fn all() -> &'static [SoilTexture] {
        &[
            SoilTexture::Clay,
            SoilTexture::Loam,
            SoilTexture::Sandy,
            SoilTexture::ClayLoam,
            SoilTexture::SandyLoam,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilTexture::Clay => "Clay",
            SoilTexture::Loam => "Loam",
            SoilTexture::Sandy => "Sandy",
            SoilTexture::ClayLoam => "Clay-Loam",
            SoilTexture::SandyLoam => "Sandy-Loam",
        }
    }

    /// Component tokens of the texture name ("Clay-Loam" -> Clay, Loam).
    pub fn components(&self) -> impl Iterator<Item = &'static str> {
        self.as_str().split('-')
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "clay" => Some(SoilTexture::Clay),
            "loam" => Some(SoilTexture::Loam),
            "sandy" | "sand" => Some(SoilTexture::Sandy),
            "clayloam" => Some(SoilTexture::ClayLoam),
            "sandyloam" => Some(SoilTexture::SandyLoam),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-step level used for nutrient demand and organic matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Level::Low),
            "medium" | "moderate" => Some(Level::Medium),
            "high" => Some(Level::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drainage {
    Poor,
    Medium,
    Good,
}

impl Drainage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Drainage::Poor => "Poor",
            Drainage::Medium => "Medium",
            Drainage::Good => "Good",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "poor" => Some(Drainage::Poor),
            "medium" | "moderate" => Some(Drainage::Medium),
            "good" => Some(Drainage::Good),
            _ => None,
        }
    }
}

impl std::fmt::Display for Drainage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_drainage() -> Option<Drainage> {
    Some(Drainage::Medium)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub texture: SoilTexture,
    pub ph: f64,
    pub organic_matter: Level,
    #[serde(default = "default_drainage")]
    pub drainage: Option<Drainage>,
}

impl SoilProfile {
    pub fn new(texture: SoilTexture, ph: f64, organic_matter: Level) -> Result<Self> {
        let soil = Self {
            texture,
            ph,
            organic_matter,
            drainage: default_drainage(),
        };
        soil.validate()?;
        Ok(soil)
    }

    pub fn with_drainage(mut self, drainage: Option<Drainage>) -> Self {
        self.drainage = drainage;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.ph.is_finite() || !(0.0..=14.0).contains(&self.ph) {
            return Err(FasalError::invalid(format!(
                "soil pH {} is outside 0-14",
                self.ph
            )));
        }
        Ok(())
    }

    /// Fallback used when neither the request nor the region supplies a soil.
    pub fn generic() -> Self {
        Self {
            texture: SoilTexture::Loam,
            ph: 7.0,
            organic_matter: Level::Medium,
            drainage: Some(Drainage::Medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_from_str_valid() {
        assert_eq!(SoilTexture::from_str("Clay"), Some(SoilTexture::Clay));
        assert_eq!(
            SoilTexture::from_str("clay-loam"),
            Some(SoilTexture::ClayLoam)
        );
        assert_eq!(
            SoilTexture::from_str("Sandy Loam"),
            Some(SoilTexture::SandyLoam)
        );
        assert_eq!(
            SoilTexture::from_str("SandyLoam"),
            Some(SoilTexture::SandyLoam)
        );
    }

    #[test]
    fn texture_from_str_invalid() {
        assert_eq!(SoilTexture::from_str("silt"), None);
        assert_eq!(SoilTexture::from_str(""), None);
    }

    #[test]
    fn texture_round_trip() {
        for texture in SoilTexture::all() {
            assert_eq!(
                SoilTexture::from_str(texture.as_str()),
                Some(*texture),
                "Round-trip failed for {:?}",
                texture
            );
        }
    }

    #[test]
    fn texture_components() {
        let parts: Vec<_> = SoilTexture::ClayLoam.components().collect();
        assert_eq!(parts, vec!["Clay", "Loam"]);
        let parts: Vec<_> = SoilTexture::Sandy.components().collect();
        assert_eq!(parts, vec!["Sandy"]);
    }

    #[test]
    fn texture_serializes_with_hyphen() {
        let json = serde_json::to_string(&SoilTexture::ClayLoam).unwrap();
        assert_eq!(json, "\"Clay-Loam\"");
    }

    #[test]
    fn soil_rejects_out_of_range_ph() {
        assert!(SoilProfile::new(SoilTexture::Loam, 14.5, Level::Medium).is_err());
        assert!(SoilProfile::new(SoilTexture::Loam, -0.1, Level::Medium).is_err());
        assert!(SoilProfile::new(SoilTexture::Loam, f64::NAN, Level::Medium).is_err());
        assert!(SoilProfile::new(SoilTexture::Loam, 0.0, Level::Medium).is_ok());
        assert!(SoilProfile::new(SoilTexture::Loam, 14.0, Level::Medium).is_ok());
    }

    #[test]
    fn soil_defaults_to_medium_drainage() {
        let soil = SoilProfile::new(SoilTexture::Clay, 7.0, Level::Low).unwrap();
        assert_eq!(soil.drainage, Some(Drainage::Medium));

        let soil: SoilProfile =
            serde_json::from_str(r#"{"texture":"Clay","ph":7.8,"organic_matter":"Low"}"#)
                .unwrap();
        assert_eq!(soil.drainage, Some(Drainage::Medium));
    }
}
