use crate::models::{DerivedSeries, WeatherDay, WeatherSeries};

/// Base temperature for growing degree days, °C.
pub const DEFAULT_BASE_TEMP: f64 = 10.0;
/// Days with less rain than this count as dry.
pub const DRY_DAY_THRESHOLD_MM: f64 = 2.0;
const ROLLING_WINDOW_DAYS: usize = 7;

/// Augment a validated series with agronomic signals.
pub fn derive_features(series: &WeatherSeries, base_temp: f64) -> DerivedSeries {
    let raw = series.days();
    let mut days = Vec::with_capacity(raw.len());
    let mut dry_run = 0u32;

    for (i, day) in raw.iter().enumerate() {
        let temp_avg = (day.temp_max + day.temp_min) / 2.0;
        let window_start = (i + 1).saturating_sub(ROLLING_WINDOW_DAYS);
        let rainfall_7d: f64 = raw[window_start..=i].iter().map(|d| d.rainfall_mm).sum();
        let dry_day = day.rainfall_mm < DRY_DAY_THRESHOLD_MM;

        dry_run = if dry_day { dry_run + 1 } else { 0 };

        days.push(WeatherDay {
            date: day.date,
            temp_max: day.temp_max,
            temp_min: day.temp_min,
            rainfall_mm: day.rainfall_mm,
            temp_avg,
            gdd: (temp_avg - base_temp).max(0.0),
            rainfall_7d,
            dry_day,
            dry_spell_days: dry_run,
        });
    }

    tracing::debug!(
        "Derived features for {} days (base {}°C)",
        days.len(),
        base_temp
    );

    DerivedSeries { base_temp, days }
}
