use crate::error::Result;
use crate::models::weather::mean;
use crate::models::{DerivedSeries, DrySpellRisk, Outlook};

pub const DEFAULT_PLANNING_DAYS: u32 = 90;

/// Daily rainfall below this is treated as missing signal.
pub(crate) const RAIN_SIGNAL_FLOOR_MM: f64 = 0.5;
/// Climatological daily rainfall used when the forecast shows none.
pub(crate) const FALLBACK_DAILY_RAIN_MM: f64 = 1.5;

const TREND_WINDOW: usize = 5;

/// Mean daily rainfall with the climatological fallback applied.
pub fn daily_rainfall_with_fallback(weather: &DerivedSeries) -> f64 {
    let daily = weather.mean_rainfall();
    if daily < RAIN_SIGNAL_FLOOR_MM {
        FALLBACK_DAILY_RAIN_MM
    } else {
        daily
    }
}

/// Persistence estimate for the planning horizon: the short-range mean nudged
/// one degree in the direction of the short-range trend.
pub fn estimate_outlook(weather: &DerivedSeries, planning_days: u32) -> Result<Outlook> {
    weather.validate()?;

    let temps: Vec<f64> = weather.days.iter().map(|d| d.temp_avg).collect();
    let baseline = mean(temps.iter().copied());

    let head = mean(temps.iter().take(TREND_WINDOW).copied());
    let tail = mean(temps.iter().rev().take(TREND_WINDOW).copied());
    let trend = tail - head;
    let nudge = if trend > 0.0 {
        1.0
    } else if trend < 0.0 {
        -1.0
    } else {
        0.0
    };

    let expected_rainfall = daily_rainfall_with_fallback(weather) * planning_days as f64;
    let max_dry_spell = weather.max_dry_spell();

    tracing::debug!(
        "Outlook: baseline {:.2}°C, trend {:+.2}, rainfall {:.1}mm over {} days",
        baseline,
        trend,
        expected_rainfall,
        planning_days
    );

    Ok(Outlook {
        planning_days,
        expected_avg_temp: round_to(baseline + nudge, 2),
        expected_rainfall_mm: round_to(expected_rainfall, 1),
        dry_spell_risk: DrySpellRisk::from_max_spell(max_dry_spell),
        max_dry_spell,
    })
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FasalError;
    use crate::logic::features::derive_features;
    use crate::models::{DailyWeather, WeatherSeries};
    use chrono::NaiveDate;

    fn derived(temps: &[f64], rain: &[f64]) -> DerivedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let days = temps
            .iter()
            .zip(rain)
            .enumerate()
            .map(|(i, (&t, &r))| {
                DailyWeather::new(start + chrono::Duration::days(i as i64), t + 5.0, t - 5.0, r)
            })
            .collect();
        derive_features(&WeatherSeries::new(days).unwrap(), 10.0)
    }

    #[test]
    fn warming_trend_adds_a_degree() {
        let temps: Vec<f64> = (0..10).map(|i| 25.0 + i as f64 * 0.2).collect();
        let weather = derived(&temps, &[5.0; 10]);
        let outlook = estimate_outlook(&weather, 90).unwrap();
        assert_eq!(outlook.expected_avg_temp, round_to(mean(temps.iter().copied()) + 1.0, 2));
        assert_eq!(outlook.expected_rainfall_mm, 450.0);
        assert_eq!(outlook.dry_spell_risk, DrySpellRisk::Low);
    }

    #[test]
    fn cooling_trend_subtracts_a_degree() {
        let temps: Vec<f64> = (0..10).map(|i| 30.0 - i as f64).collect();
        let outlook = estimate_outlook(&derived(&temps, &[5.0; 10]), 90).unwrap();
        assert_eq!(outlook.expected_avg_temp, 24.5);
    }

    #[test]
    fn flat_series_keeps_baseline() {
        let outlook = estimate_outlook(&derived(&[27.0; 8], &[8.0; 8]), 90).unwrap();
        assert_eq!(outlook.expected_avg_temp, 27.0);
        assert_eq!(outlook.expected_rainfall_mm, 720.0);
    }

    #[test]
    fn dry_forecast_uses_fallback_rainfall() {
        let outlook = estimate_outlook(&derived(&[27.0; 6], &[0.0; 6]), 100).unwrap();
        assert_eq!(outlook.expected_rainfall_mm, 150.0);
        assert_eq!(outlook.max_dry_spell, 6);
        assert_eq!(outlook.dry_spell_risk, DrySpellRisk::Moderate);
    }

    #[test]
    fn long_dry_spell_is_high_risk() {
        let mut rain = vec![0.0; 9];
        rain[0] = 10.0;
        let outlook = estimate_outlook(&derived(&[27.0; 9], &rain), 90).unwrap();
        assert_eq!(outlook.max_dry_spell, 8);
        assert_eq!(outlook.dry_spell_risk, DrySpellRisk::High);
    }

    #[test]
    fn short_or_empty_series_is_rejected() {
        let mut weather = derived(&[27.0; 6], &[5.0; 6]);
        weather.days.truncate(2);
        assert!(matches!(
            estimate_outlook(&weather, 90),
            Err(FasalError::InvalidInput(_))
        ));

        weather.days.clear();
        assert!(estimate_outlook(&weather, 90).is_err());
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(84.996, 2), 85.0);
    }
}
