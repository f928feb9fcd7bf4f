use crate::error::{FasalError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum number of days the scoring pipeline accepts.
pub const MIN_SERIES_DAYS: usize = 5;

/// Raw daily observation or forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub rainfall_mm: f64,
}

impl DailyWeather {
    pub fn new(date: NaiveDate, temp_max: f64, temp_min: f64, rainfall_mm: f64) -> Self {
        Self {
            date,
            temp_max,
            temp_min,
            rainfall_mm,
        }
    }
}

/// Chronological daily series with at least five days and no duplicate dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSeries {
    days: Vec<DailyWeather>,
}

impl WeatherSeries {
    pub fn new(days: Vec<DailyWeather>) -> Result<Self> {
        if days.len() < MIN_SERIES_DAYS {
            return Err(FasalError::invalid(format!(
                "weather series has {} days; at least {} are required",
                days.len(),
                MIN_SERIES_DAYS
            )));
        }

        for day in &days {
            if !(day.temp_max.is_finite() && day.temp_min.is_finite() && day.rainfall_mm.is_finite())
            {
                return Err(FasalError::invalid(format!(
                    "non-finite weather value on {}",
                    day.date
                )));
            }
            if day.rainfall_mm < 0.0 {
                return Err(FasalError::invalid(format!(
                    "negative rainfall {} mm on {}",
                    day.rainfall_mm, day.date
                )));
            }
        }

        if let Some(pair) = days.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(FasalError::invalid(format!(
                "weather series is not strictly chronological at {} -> {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(Self { days })
    }

    pub fn days(&self) -> &[DailyWeather] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }
}

/// Daily record augmented with agronomic signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub rainfall_mm: f64,
    pub temp_avg: f64,
    pub gdd: f64,
    pub rainfall_7d: f64,
    pub dry_day: bool,
    pub dry_spell_days: u32,
}

/// Output of the feature deriver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub base_temp: f64,
    pub days: Vec<WeatherDay>,
}

impl DerivedSeries {
    /// Rejects series too short for trend and dry-spell statistics.
    pub fn validate(&self) -> Result<()> {
        if self.days.len() < MIN_SERIES_DAYS {
            return Err(FasalError::invalid(format!(
                "derived series has {} days; at least {} are required",
                self.days.len(),
                MIN_SERIES_DAYS
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn mean_temp(&self) -> f64 {
        mean(self.days.iter().map(|d| d.temp_avg))
    }

    pub fn mean_rainfall(&self) -> f64 {
        mean(self.days.iter().map(|d| d.rainfall_mm))
    }

    pub fn total_rainfall(&self) -> f64 {
        self.days.iter().map(|d| d.rainfall_mm).sum()
    }

    pub fn total_gdd(&self) -> f64 {
        self.days.iter().map(|d| d.gdd).sum()
    }

    pub fn max_dry_spell(&self) -> u32 {
        self.days.iter().map(|d| d.dry_spell_days).max().unwrap_or(0)
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64, rain: f64) -> DailyWeather {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        DailyWeather::new(start + chrono::Duration::days(offset), 32.0, 22.0, rain)
    }

    #[test]
    fn series_requires_five_days() {
        let days: Vec<_> = (0..4).map(|i| day(i, 1.0)).collect();
        assert!(WeatherSeries::new(days).is_err());

        let days: Vec<_> = (0..5).map(|i| day(i, 1.0)).collect();
        assert!(WeatherSeries::new(days).is_ok());
    }

    #[test]
    fn series_rejects_duplicates_and_disorder() {
        let mut days: Vec<_> = (0..6).map(|i| day(i, 1.0)).collect();
        days[3] = days[2];
        assert!(WeatherSeries::new(days).is_err());

        let mut days: Vec<_> = (0..6).map(|i| day(i, 1.0)).collect();
        days.swap(1, 4);
        assert!(WeatherSeries::new(days).is_err());
    }

    #[test]
    fn series_rejects_negative_or_nan_values() {
        let mut days: Vec<_> = (0..6).map(|i| day(i, 1.0)).collect();
        days[2].rainfall_mm = -1.0;
        assert!(WeatherSeries::new(days).is_err());

        let mut days: Vec<_> = (0..6).map(|i| day(i, 1.0)).collect();
        days[2].temp_max = f64::NAN;
        assert!(WeatherSeries::new(days).is_err());
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert!((mean([1.0, 2.0, 3.0].into_iter()) - 2.0).abs() < 1e-9);
    }
}
