use crate::error::{FasalError, Result};
use crate::models::Season;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Transition window used by the façades.
pub const DEFAULT_TRANSITION_DAYS: i64 = 30;

/// Agricultural season for a calendar date.
///
/// Kharif runs June 1 to October 31, Rabi November 1 to March 31 and Zaid
/// April 1 to May 31.
pub fn detect_season(date: NaiveDate) -> Season {
    match date.month() {
        4 | 5 => Season::Zaid,
        6..=10 => Season::Kharif,
        _ => Season::Rabi,
    }
}

/// Last day of the season active on `date`.
pub fn season_end(date: NaiveDate) -> NaiveDate {
    let year = date.year();
    let (end_year, month, day) = match detect_season(date) {
        Season::Kharif => (year, 10, 31),
        Season::Zaid => (year, 5, 31),
        Season::Rabi if date.month() >= 11 => (year + 1, 3, 31),
        Season::Rabi => (year, 3, 31),
    };
    NaiveDate::from_ymd_opt(end_year, month, day).unwrap_or(date)
}

/// Whether `date` falls within `threshold_days` of its season's end, and the
/// season that follows if so.
pub fn is_transition(date: NaiveDate, threshold_days: i64) -> (bool, Option<Season>) {
    let remaining = (season_end(date) - date).num_days();
    if remaining <= threshold_days {
        (true, Some(detect_season(date).next()))
    } else {
        (false, None)
    }
}

/// Scale a crop's water requirement for the season's evaporation and
/// residual moisture.
pub fn season_water_adjustment(season: Season, requirement_mm: f64) -> f64 {
    let multiplier = match season {
        Season::Kharif => 0.85,
        Season::Rabi => 0.95,
        Season::Zaid => 1.10,
    };
    let adjusted = requirement_mm * multiplier;
    tracing::debug!(
        "Water adjustment for {}: {}mm -> {:.1}mm (multiplier: {})",
        season,
        requirement_mm,
        adjusted,
        multiplier
    );
    adjusted
}

/// Farmer-facing sentence describing the season.
pub fn guidance_text(season: Season, is_transition: bool, next: Option<Season>) -> String {
    match next {
        Some(next) if is_transition => format!(
            "Currently in late {} season, transitioning to {}. \
             Consider crops suitable for both seasons or early {} varieties.",
            season, next, next
        ),
        _ => {
            let info = season.info();
            format!(
                "Current season: {}. {}. Optimal for: {}.",
                season,
                info.description,
                info.typical_crops
                    .iter()
                    .take(3)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlantingWindow {
    pub season: Season,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: &'static str,
}

impl PlantingWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Recommended sowing window for a season in `year`.
pub fn planting_window(season: Season, year: i32) -> Option<PlantingWindow> {
    let (start, end, description) = match season {
        Season::Kharif => (
            (6, 1),
            (7, 15),
            "Plant with onset of monsoon (early June to mid-July)",
        ),
        Season::Rabi => (
            (10, 15),
            (11, 30),
            "Plant after monsoon withdrawal (mid-October to November)",
        ),
        Season::Zaid => (
            (3, 1),
            (4, 15),
            "Plant in early summer (March to mid-April)",
        ),
    };

    Some(PlantingWindow {
        season,
        start: NaiveDate::from_ymd_opt(year, start.0, start.1)?,
        end: NaiveDate::from_ymd_opt(year, end.0, end.1)?,
        description,
    })
}

pub fn parse_season(name: &str) -> Result<Season> {
    Season::from_str(name).ok_or_else(|| {
        FasalError::invalid(format!(
            "unknown season '{}'; expected Kharif, Rabi or Zaid",
            name
        ))
    })
}

/// Season summary shared by the CLI and the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub date: NaiveDate,
    pub season: Season,
    pub season_end: NaiveDate,
    pub is_transition: bool,
    pub next_season: Option<Season>,
    pub guidance: String,
    pub planting_window: Option<PlantingWindow>,
}

impl SeasonReport {
    pub fn for_date(date: NaiveDate) -> Self {
        let season = detect_season(date);
        let (transition, next) = is_transition(date, DEFAULT_TRANSITION_DAYS);
        Self {
            date,
            season,
            season_end: season_end(date),
            is_transition: transition,
            next_season: next,
            guidance: guidance_text(season, transition, next),
            planting_window: planting_window(season, date.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn partition_check(year: i32) {
        let mut day = date(year, 1, 1);
        let mut counts = [0usize; 3];
        while day.year() == year {
            let season = detect_season(day);
            let expected = match (day.month(), day.day()) {
                (6..=10, _) => Season::Kharif,
                (4 | 5, _) => Season::Zaid,
                _ => Season::Rabi,
            };
            assert_eq!(season, expected, "{}", day);
            counts[Season::all().iter().position(|s| *s == season).unwrap()] += 1;
            day = day.succ_opt().unwrap();
        }
        let total: usize = counts.iter().sum();
        assert_eq!(total, if year % 4 == 0 { 366 } else { 365 });
        assert_eq!(counts[0], 153);
        assert_eq!(counts[2], 61);
    }

    #[test]
    fn every_day_has_exactly_one_season() {
        partition_check(2023);
        partition_check(2024);
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(detect_season(date(2024, 5, 31)), Season::Zaid);
        assert_eq!(detect_season(date(2024, 6, 1)), Season::Kharif);
        assert_eq!(detect_season(date(2024, 10, 31)), Season::Kharif);
        assert_eq!(detect_season(date(2024, 11, 1)), Season::Rabi);
        assert_eq!(detect_season(date(2024, 3, 31)), Season::Rabi);
        assert_eq!(detect_season(date(2024, 4, 1)), Season::Zaid);
    }

    #[test]
    fn rabi_end_crosses_year() {
        assert_eq!(season_end(date(2024, 12, 15)), date(2025, 3, 31));
        assert_eq!(season_end(date(2025, 2, 1)), date(2025, 3, 31));
        assert_eq!(season_end(date(2024, 7, 4)), date(2024, 10, 31));
    }

    #[test]
    fn transition_window() {
        assert_eq!(
            is_transition(date(2024, 10, 15), 30),
            (true, Some(Season::Rabi))
        );
        assert_eq!(is_transition(date(2024, 7, 1), 30), (false, None));
        assert_eq!(
            is_transition(date(2024, 5, 20), 30),
            (true, Some(Season::Kharif))
        );
        assert_eq!(
            is_transition(date(2025, 3, 10), 30),
            (true, Some(Season::Zaid))
        );
        assert_eq!(is_transition(date(2024, 10, 15), 7), (false, None));
    }

    #[test]
    fn water_multipliers() {
        assert!((season_water_adjustment(Season::Kharif, 400.0) - 340.0).abs() < 1e-9);
        assert!((season_water_adjustment(Season::Rabi, 400.0) - 380.0).abs() < 1e-9);
        assert!((season_water_adjustment(Season::Zaid, 400.0) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn guidance_sentences() {
        let steady = guidance_text(Season::Kharif, false, None);
        assert_eq!(
            steady,
            "Current season: Kharif. Monsoon season crops (June-October). Optimal for: Bajra, Jowar, Rice."
        );

        let late = guidance_text(Season::Kharif, true, Some(Season::Rabi));
        assert!(late.starts_with("Currently in late Kharif season, transitioning to Rabi."));
        assert!(late.ends_with("early Rabi varieties."));
    }

    #[test]
    fn planting_windows() {
        let kharif = planting_window(Season::Kharif, 2024).unwrap();
        assert_eq!(kharif.start, date(2024, 6, 1));
        assert_eq!(kharif.end, date(2024, 7, 15));
        assert!(kharif.contains(date(2024, 6, 20)));
        assert!(!kharif.contains(date(2024, 8, 1)));

        let rabi = planting_window(Season::Rabi, 2024).unwrap();
        assert_eq!(rabi.start, date(2024, 10, 15));
    }

    #[test]
    fn parse_rejects_unknown_season() {
        assert_eq!(parse_season("rabi").unwrap(), Season::Rabi);
        assert!(matches!(
            parse_season("monsoon"),
            Err(FasalError::InvalidInput(_))
        ));
    }

    #[test]
    fn report_for_date() {
        let report = SeasonReport::for_date(date(2024, 10, 20));
        assert_eq!(report.season, Season::Kharif);
        assert!(report.is_transition);
        assert_eq!(report.next_season, Some(Season::Rabi));
        assert_eq!(report.season_end, date(2024, 10, 31));
    }
}
