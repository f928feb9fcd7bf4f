use crate::db::Database;
use crate::error::{FasalError, Result};
use crate::models::DailyWeather;
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Monthly climatology statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Statistic {
    Mean,
    P25,
    P75,
    Max,
    Min,
}

impl Statistic {
    pub fn all() -> &'static [Statistic] {
        &[
            Statistic::Mean,
            Statistic::P25,
            Statistic::P75,
            Statistic::Max,
            Statistic::Min,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::P25 => "p25",
            Statistic::P75 => "p75",
            Statistic::Max => "max",
            Statistic::Min => "min",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mean" | "avg" => Some(Statistic::Mean),
            "p25" => Some(Statistic::P25),
            "p75" => Some(Statistic::P75),
            "max" => Some(Statistic::Max),
            "min" => Some(Statistic::Min),
            _ => None,
        }
    }

    /// Apply the statistic; `None` for an empty sample.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let result = match self {
            Statistic::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Statistic::P25 => quantile(values, 0.25),
            Statistic::P75 => quantile(values, 0.75),
            Statistic::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        };
        Some(result)
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linear-interpolated quantile of a non-empty sample.
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Climatology {
    pub region_id: String,
    pub month: u32,
    pub statistic: Statistic,
    pub samples: usize,
    pub temp_max: f64,
    pub temp_min: f64,
    pub rainfall_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub region_id: String,
    pub available: bool,
    pub years: Vec<i32>,
    pub total_records: usize,
}

impl Coverage {
    pub fn year_range(&self) -> Option<String> {
        match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) => Some(format!("{}-{}", first, last)),
            _ => None,
        }
    }
}

// Historical weather queries

impl Database {
    /// Replace the (region, year) partition with `days`.
    pub fn save_history(&self, region_id: &str, year: i32, days: &[DailyWeather]) -> Result<usize> {
        if let Some(stray) = days.iter().find(|d| d.date.year() != year) {
            return Err(FasalError::invalid(format!(
                "{} does not belong to year {}",
                stray.date, year
            )));
        }

        let saved = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM weather_history WHERE region_id = ?1 AND year = ?2",
                params![region_id, year],
            )?;
            {
                let mut stmt = tx.prepare(
                    r#"
                    INSERT INTO weather_history
                        (region_id, year, month, date, temp_max, temp_min, rainfall_mm)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )?;
                for day in days {
                    stmt.execute(params![
                        region_id,
                        year,
                        day.date.month(),
                        day.date.format(DATE_FORMAT).to_string(),
                        day.temp_max,
                        day.temp_min,
                        day.rainfall_mm,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(days.len())
        })?;

        tracing::info!("Saved {} records for {} year {}", saved, region_id, year);
        Ok(saved)
    }

    /// Stored days for a region between two dates (inclusive), oldest first.
    pub fn history_range(
        &self,
        region_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeather>> {
        self.ensure_region_has_history(region_id)?;

        let days = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT date, temp_max, temp_min, rainfall_mm FROM weather_history
                WHERE region_id = ?1 AND date >= ?2 AND date <= ?3
                ORDER BY date
                "#,
            )?;
            let rows = stmt.query_map(
                params![
                    region_id,
                    start.format(DATE_FORMAT).to_string(),
                    end.format(DATE_FORMAT).to_string()
                ],
                row_to_daily_weather,
            )?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        })?;

        tracing::info!(
            "Retrieved {} records for {} from {} to {}",
            days.len(),
            region_id,
            start,
            end
        );
        Ok(days)
    }

    /// Statistic over every stored day of `month` across all years.
    ///
    /// Returns `None` when the region has data but none for that month.
    pub fn climatology(
        &self,
        region_id: &str,
        month: u32,
        statistic: Statistic,
    ) -> Result<Option<Climatology>> {
        if !(1..=12).contains(&month) {
            return Err(FasalError::invalid(format!("month {} is not in 1-12", month)));
        }
        self.ensure_region_has_history(region_id)?;

        let rows: Vec<(f64, f64, f64)> = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT temp_max, temp_min, rainfall_mm FROM weather_history WHERE region_id = ?1 AND month = ?2",
            )?;
            let rows = stmt.query_map(params![region_id, month], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        })?;

        if rows.is_empty() {
            tracing::warn!("No data found for month {} in region {}", month, region_id);
            return Ok(None);
        }

        let column = |pick: fn(&(f64, f64, f64)) -> f64| -> Vec<f64> { rows.iter().map(pick).collect() };
        let temp_max = column(|r| r.0);
        let temp_min = column(|r| r.1);
        let rainfall = column(|r| r.2);

        let climatology = Climatology {
            region_id: region_id.to_string(),
            month,
            statistic,
            samples: rows.len(),
            temp_max: statistic.apply(&temp_max).unwrap_or_default(),
            temp_min: statistic.apply(&temp_min).unwrap_or_default(),
            rainfall_mm: statistic.apply(&rainfall).unwrap_or_default(),
        };

        tracing::info!(
            "Computed {} climatology for {}, month {}",
            statistic,
            region_id,
            month
        );
        Ok(Some(climatology))
    }

    /// Regions with any stored history, sorted.
    pub fn history_regions(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT DISTINCT region_id FROM weather_history ORDER BY region_id")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect::<rusqlite::Result<Vec<String>>>()
                .map_err(Into::into)
        })
    }

    pub fn coverage(&self, region_id: &str) -> Result<Coverage> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT year, COUNT(*) FROM weather_history
                WHERE region_id = ?1 GROUP BY year ORDER BY year
                "#,
            )?;
            let per_year = stmt
                .query_map([region_id], |row| Ok((row.get::<_, i32>(0)?, row.get::<_, i64>(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Coverage {
                region_id: region_id.to_string(),
                available: !per_year.is_empty(),
                years: per_year.iter().map(|(y, _)| *y).collect(),
                total_records: per_year.iter().map(|(_, n)| *n as usize).sum(),
            })
        })
    }

    fn ensure_region_has_history(&self, region_id: &str) -> Result<()> {
        let found = self.with_conn(|conn| {
            conn.query_row(
                "SELECT 1 FROM weather_history WHERE region_id = ?1 LIMIT 1",
                [region_id],
                |row| row.get::<_, i32>(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        match found {
            Some(_) => Ok(()),
            None => {
                tracing::error!("No historical data found for region {}", region_id);
                Err(FasalError::NotFound(format!(
                    "no historical data available for region {}",
                    region_id
                )))
            }
        }
    }
}

fn row_to_daily_weather(row: &Row) -> rusqlite::Result<DailyWeather> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(DailyWeather {
        date,
        temp_max: row.get("temp_max")?,
        temp_min: row.get("temp_min")?,
        rainfall_mm: row.get("rainfall_mm")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_of_days(year: i32, rain: impl Fn(u32) -> f64) -> Vec<DailyWeather> {
        let mut days = Vec::new();
        let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        while date.year() == year {
            days.push(DailyWeather::new(
                date,
                30.0 + date.month() as f64,
                18.0,
                rain(date.ordinal()),
            ));
            date = date.succ_opt().unwrap();
        }
        days
    }

    #[test]
    fn save_and_read_range() {
        let db = Database::open_in_memory().unwrap();
        let saved = db.save_history("PUNE", 2023, &year_of_days(2023, |_| 1.0)).unwrap();
        assert_eq!(saved, 365);

        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        let june = db.history_range("PUNE", start, end).unwrap();
        assert_eq!(june.len(), 30);
        assert_eq!(june[0].date, start);
        assert_eq!(june[29].date, end);
        assert_eq!(june[0].temp_max, 36.0);
    }

    #[test]
    fn saving_a_year_replaces_the_partition() {
        let db = Database::open_in_memory().unwrap();
        db.save_history("SOLAPUR", 2023, &year_of_days(2023, |_| 1.0)).unwrap();
        db.save_history("SOLAPUR", 2023, &year_of_days(2023, |_| 2.0)[..31]).unwrap();

        let coverage = db.coverage("SOLAPUR").unwrap();
        assert_eq!(coverage.total_records, 31);
        assert_eq!(coverage.years, vec![2023]);
    }

    #[test]
    fn rejects_days_from_another_year() {
        let db = Database::open_in_memory().unwrap();
        let result = db.save_history("PUNE", 2024, &year_of_days(2023, |_| 1.0));
        assert!(matches!(result, Err(FasalError::InvalidInput(_))));
    }

    #[test]
    fn unknown_region_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(matches!(
            db.history_range("LATUR", start, start),
            Err(FasalError::NotFound(_))
        ));
        assert!(matches!(
            db.climatology("LATUR", 6, Statistic::Mean),
            Err(FasalError::NotFound(_))
        ));
    }

    #[test]
    fn climatology_across_years() {
        let db = Database::open_in_memory().unwrap();
        db.save_history("NASHIK", 2022, &year_of_days(2022, |_| 2.0)).unwrap();
        db.save_history("NASHIK", 2023, &year_of_days(2023, |_| 4.0)).unwrap();

        let mean = db.climatology("NASHIK", 7, Statistic::Mean).unwrap().unwrap();
        assert_eq!(mean.samples, 62);
        assert!((mean.rainfall_mm - 3.0).abs() < 1e-9);
        assert!((mean.temp_max - 37.0).abs() < 1e-9);

        let max = db.climatology("NASHIK", 7, Statistic::Max).unwrap().unwrap();
        assert_eq!(max.rainfall_mm, 4.0);
        let min = db.climatology("NASHIK", 7, Statistic::Min).unwrap().unwrap();
        assert_eq!(min.rainfall_mm, 2.0);

        assert!(db.climatology("NASHIK", 13, Statistic::Mean).is_err());
    }

    #[test]
    fn climatology_for_month_without_data() {
        let db = Database::open_in_memory().unwrap();
        let january: Vec<_> = year_of_days(2023, |_| 1.0).into_iter().take(31).collect();
        db.save_history("SATARA", 2023, &january).unwrap();
        assert_eq!(db.climatology("SATARA", 8, Statistic::Mean).unwrap(), None);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert!((Statistic::P25.apply(&values).unwrap() - 1.75).abs() < 1e-9);
        assert!((Statistic::P75.apply(&values).unwrap() - 3.25).abs() < 1e-9);
        assert_eq!(Statistic::Mean.apply(&[]), None);
        assert_eq!(Statistic::from_str("P75"), Some(Statistic::P75));
    }

    #[test]
    fn regions_and_coverage() {
        let db = Database::open_in_memory().unwrap();
        db.save_history("PUNE", 2023, &year_of_days(2023, |_| 1.0)).unwrap();
        db.save_history("PUNE", 2024, &year_of_days(2024, |_| 1.0)).unwrap();
        db.save_history("LATUR", 2024, &year_of_days(2024, |_| 1.0)).unwrap();

        assert_eq!(db.history_regions().unwrap(), vec!["LATUR", "PUNE"]);

        let coverage = db.coverage("PUNE").unwrap();
        assert!(coverage.available);
        assert_eq!(coverage.total_records, 365 + 366);
        assert_eq!(coverage.year_range().as_deref(), Some("2023-2024"));

        let none = db.coverage("KOLHAPUR").unwrap();
        assert!(!none.available);
        assert_eq!(none.year_range(), None);
    }
}
