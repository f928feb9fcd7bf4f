use serde::{Deserialize, Serialize};

/// Indian agricultural season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon season, June-October
    Kharif,
    /// Winter season, November-March
    Rabi,
    /// Summer season, April-May
    Zaid,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Kharif, Season::Rabi, Season::Zaid]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "zaid" | "zayed" => Some(Season::Zaid),
            _ => None,
        }
    }

    /// The season that follows this one in the calendar year.
    pub fn next(&self) -> Season {
        match self {
            Season::Kharif => Season::Rabi,
            Season::Rabi => Season::Zaid,
            Season::Zaid => Season::Kharif,
        }
    }

    pub fn info(&self) -> SeasonInfo {
        match self {
            Season::Kharif => SeasonInfo {
                season: *self,
                description: "Monsoon season crops (June-October)",
                typical_crops: &["Bajra", "Jowar", "Rice", "Maize", "Cotton", "Soybean"],
                water_source: "Primarily monsoon rainfall",
                characteristics: "High rainfall, warm temperatures, humid conditions",
            },
            Season::Rabi => SeasonInfo {
                season: *self,
                description: "Winter season crops (November-March)",
                typical_crops: &["Wheat", "Chickpea", "Mustard", "Barley", "Peas"],
                water_source: "Irrigation and residual soil moisture",
                characteristics: "Cool temperatures, low rainfall, requires irrigation",
            },
            Season::Zaid => SeasonInfo {
                season: *self,
                description: "Summer season crops (April-May)",
                typical_crops: &["Watermelon", "Cucumber", "Muskmelon", "Vegetables"],
                water_source: "Primarily irrigation",
                characteristics: "Hot temperatures, dry conditions, high water requirement",
            },
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonInfo {
    pub season: Season,
    pub description: &'static str,
    pub typical_crops: &'static [&'static str],
    pub water_source: &'static str,
    pub characteristics: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_from_str_valid() {
        assert_eq!(Season::from_str("Kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("rabi"), Some(Season::Rabi));
        assert_eq!(Season::from_str(" ZAID "), Some(Season::Zaid));
    }

    #[test]
    fn season_from_str_invalid() {
        assert_eq!(Season::from_str("monsoon"), None);
        assert_eq!(Season::from_str(""), None);
    }

    #[test]
    fn season_cycle_returns_to_start() {
        for season in Season::all() {
            assert_eq!(season.next().next().next(), *season);
        }
    }

    #[test]
    fn season_info_lists_crops() {
        for season in Season::all() {
            assert!(!season.info().typical_crops.is_empty());
        }
    }
}
