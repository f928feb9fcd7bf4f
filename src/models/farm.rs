use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationLevel {
    None,
    #[default]
    Limited,
    Full,
}

impl IrrigationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationLevel::None => "None",
            IrrigationLevel::Limited => "Limited",
            IrrigationLevel::Full => "Full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "rainfed" => Some(IrrigationLevel::None),
            "limited" | "partial" => Some(IrrigationLevel::Limited),
            "full" => Some(IrrigationLevel::Full),
            _ => None,
        }
    }

    /// Limited and full irrigation both count as available to the scorer.
    pub fn is_available(&self) -> bool {
        !matches!(self, IrrigationLevel::None)
    }
}

impl std::fmt::Display for IrrigationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a farm is: a catalog region or raw coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Region(String),
    Coordinates { latitude: f64, longitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irrigation_from_str() {
        assert_eq!(IrrigationLevel::from_str("None"), Some(IrrigationLevel::None));
        assert_eq!(
            IrrigationLevel::from_str("limited"),
            Some(IrrigationLevel::Limited)
        );
        assert_eq!(IrrigationLevel::from_str("FULL"), Some(IrrigationLevel::Full));
        assert_eq!(IrrigationLevel::from_str("drip"), None);
    }

    #[test]
    fn irrigation_availability() {
        assert!(!IrrigationLevel::None.is_available());
        assert!(IrrigationLevel::Limited.is_available());
        assert!(IrrigationLevel::Full.is_available());
    }
}
