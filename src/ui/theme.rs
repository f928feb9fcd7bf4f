use crate::models::{DrySpellRisk, RiskFlag, Season};
use ratatui::style::{Color, Modifier, Style};

/// Lower edge of a colored range on a gauge; a value takes the highest band it reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub from: f64,
    pub color: Color,
    pub label: &'static str,
}

impl Band {
    pub const fn new(from: f64, color: Color, label: &'static str) -> Self {
        Self { from, color, label }
    }

    pub fn lookup(bands: &[Band], value: f64) -> Option<&Band> {
        bands.iter().rev().find(|b| value >= b.from)
    }
}

pub struct Theme;

impl Theme {
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const FIELD: Color = Color::Green;
    pub const SKY: Color = Color::Cyan;

    // Suitability and risk share one traffic-light scale
    pub const GOOD: Color = Color::Green;
    pub const FAIR: Color = Color::Yellow;
    pub const POOR: Color = Color::Red;
    pub const WATER: Color = Color::LightBlue;

    pub const SUITABLE_SCORE: f64 = 80.0;
    pub const MARGINAL_SCORE: f64 = 60.0;

    pub const SCORE_BANDS: &'static [Band] = &[
        Band::new(0.0, Self::POOR, "poor"),
        Band::new(Self::MARGINAL_SCORE, Self::FAIR, "fair"),
        Band::new(Self::SUITABLE_SCORE, Self::GOOD, "good"),
    ];

    /// Mean temperature bands for tropical field crops.
    pub const TEMPERATURE_BANDS: &'static [Band] = &[
        Band::new(0.0, Self::SKY, "cool"),
        Band::new(18.0, Self::GOOD, "mild"),
        Band::new(28.0, Self::FAIR, "warm"),
        Band::new(35.0, Self::POOR, "hot"),
    ];

    pub const RAINFALL_BANDS: &'static [Band] = &[
        Band::new(0.0, Self::FAIR, "dry"),
        Band::new(300.0, Self::GOOD, "adequate"),
        Band::new(800.0, Self::WATER, "wet"),
    ];

    // Lower edges follow DrySpellRisk::from_max_spell
    pub const DRY_SPELL_BANDS: &'static [Band] = &[
        Band::new(0.0, Self::GOOD, "low"),
        Band::new(5.0, Self::FAIR, "moderate"),
        Band::new(8.0, Self::POOR, "high"),
    ];

    pub fn suitability(score: f64) -> Color {
        Band::lookup(Self::SCORE_BANDS, score)
            .map(|b| b.color)
            .unwrap_or(Self::POOR)
    }

    pub fn dry_spell(risk: DrySpellRisk) -> Color {
        match risk {
            DrySpellRisk::Low => Self::GOOD,
            DrySpellRisk::Moderate => Self::FAIR,
            DrySpellRisk::High => Self::POOR,
        }
    }

    pub fn risk(flag: RiskFlag) -> Color {
        match flag {
            RiskFlag::HighDrought => Self::POOR,
            RiskFlag::ModerateDrought => Self::FAIR,
            RiskFlag::WaterDeficit => Self::WATER,
        }
    }

    pub fn season(season: Season) -> Color {
        match season {
            Season::Kharif => Self::FIELD,
            Season::Rabi => Self::SKY,
            Season::Zaid => Self::FAIR,
        }
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FIELD).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default().fg(Self::SKY).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Self::header().bg(Self::DIM)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::GOOD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::FAIR)
    }

    pub fn nav_key() -> Style {
        Self::title()
    }

    pub fn nav_label() -> Style {
        Self::dim()
    }

    pub fn border() -> Style {
        Self::dim()
    }
}
