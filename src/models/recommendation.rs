use super::Tolerance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DrySpellRisk {
    Low,
    Moderate,
    High,
}

impl DrySpellRisk {
    /// Risk label for the longest run of dry days in a series.
    pub fn from_max_spell(max_dry_spell: u32) -> Self {
        if max_dry_spell > 7 {
            DrySpellRisk::High
        } else if max_dry_spell > 4 {
            DrySpellRisk::Moderate
        } else {
            DrySpellRisk::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrySpellRisk::Low => "Low",
            DrySpellRisk::Moderate => "Moderate",
            DrySpellRisk::High => "High",
        }
    }
}

impl std::fmt::Display for DrySpellRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persistence-based estimate for the planning horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outlook {
    pub planning_days: u32,
    pub expected_avg_temp: f64,
    pub expected_rainfall_mm: f64,
    pub dry_spell_risk: DrySpellRisk,
    pub max_dry_spell: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    HighDrought,
    ModerateDrought,
    WaterDeficit,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::HighDrought => "High drought risk",
            RiskFlag::ModerateDrought => "Moderate drought risk",
            RiskFlag::WaterDeficit => "Water deficit risk",
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One weighted component of a suitability score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

impl FactorScore {
    pub fn new(id: &str, name: &str, weight: f64, score: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weight,
            score,
        }
    }

    pub fn contribution(&self) -> f64 {
        self.weight * self.score
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub crop_id: String,
    pub crop: String,
    pub suitability_score: f64,
    pub expected_rainfall_mm: f64,
    pub water_required_mm: f64,
    /// Shortfall against rainfall alone; the irrigation buffer is not subtracted.
    pub irrigation_needed_mm: f64,
    pub growth_duration_days: u32,
    pub risk_note: String,
    pub risks: Vec<RiskFlag>,
    pub drought_tolerance: Tolerance,
    pub regional_suitability: f64,
    pub breakdown: Vec<FactorScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amendments: Vec<String>,
}

impl Recommendation {
    pub fn is_low_risk(&self) -> bool {
        self.risks.is_empty()
    }
}
