use crate::config::WeatherConfig;
use crate::error::{FasalError, Result};
use crate::models::DailyWeather;
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Anything that can supply a daily series for a location.
pub trait WeatherSource: Send + Sync {
    /// Daily max/min temperature (°C) and rainfall (mm) for the next `days` days.
    fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> impl Future<Output = Result<Vec<DailyWeather>>> + Send;
}

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmResponse {
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn forecast_url(&self, latitude: f64, longitude: f64, days: u32) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily={}&forecast_days={}&timezone=auto",
            self.config.forecast_url, latitude, longitude, DAILY_FIELDS, days
        )
    }

    fn archive_url(&self, latitude: f64, longitude: f64, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&timezone=auto",
            self.config.archive_url,
            latitude,
            longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            DAILY_FIELDS
        )
    }

    /// Fetch observed daily weather between two dates (inclusive).
    pub async fn fetch_archive(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyWeather>> {
        if end < start {
            return Err(FasalError::invalid(format!(
                "archive range ends ({}) before it starts ({})",
                end, start
            )));
        }
        let url = self.archive_url(latitude, longitude, start, end);
        self.get_daily(&url).await
    }

    /// Test connection to the forecast API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let url = self.forecast_url(latitude, longitude, 1);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FasalError::WeatherUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }

    async fn get_daily(&self, url: &str) -> Result<Vec<DailyWeather>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FasalError::WeatherUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FasalError::WeatherUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmResponse = response.json().await.map_err(|e| {
            FasalError::WeatherUnavailable(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        convert_daily(om_response.daily)
    }
}

impl WeatherSource for OpenMeteoClient {
    async fn fetch_daily(&self, latitude: f64, longitude: f64, days: u32) -> Result<Vec<DailyWeather>> {
        let url = self.forecast_url(latitude, longitude, days);
        let days = self.get_daily(&url).await?;
        tracing::info!(
            "Fetched {} forecast days for ({:.4}, {:.4})",
            days.len(),
            latitude,
            longitude
        );
        Ok(days)
    }
}

fn convert_daily(daily: OmDaily) -> Result<Vec<DailyWeather>> {
    let n = daily.time.len();
    if daily.temperature_2m_max.len() != n
        || daily.temperature_2m_min.len() != n
        || daily.precipitation_sum.len() != n
    {
        return Err(FasalError::WeatherUnavailable(
            "Open-Meteo daily arrays have mismatched lengths".into(),
        ));
    }

    let mut days = Vec::with_capacity(n);
    let mut dropped = 0usize;

    for i in 0..n {
        let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").map_err(|e| {
            FasalError::WeatherUnavailable(format!("Bad date '{}': {}", daily.time[i], e))
        })?;

        match (
            daily.temperature_2m_max[i],
            daily.temperature_2m_min[i],
            daily.precipitation_sum[i],
        ) {
            (Some(max), Some(min), Some(rain)) => {
                days.push(DailyWeather::new(date, max, min, rain.max(0.0)))
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} Open-Meteo days with missing values", dropped);
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenMeteoClient {
        OpenMeteoClient::new(WeatherConfig::default())
    }

    #[test]
    fn forecast_url_carries_parameters() {
        let url = client().forecast_url(18.5204, 73.8567, 16);
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?"));
        assert!(url.contains("latitude=18.5204"));
        assert!(url.contains("longitude=73.8567"));
        assert!(url.contains("forecast_days=16"));
        assert!(url.contains("daily=temperature_2m_max,temperature_2m_min,precipitation_sum"));
        assert!(url.contains("timezone=auto"));
    }

    #[test]
    fn archive_url_carries_dates() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let url = client().archive_url(17.66, 75.91, start, end);
        assert!(url.starts_with("https://archive-api.open-meteo.com/v1/archive?"));
        assert!(url.contains("start_date=2023-01-01"));
        assert!(url.contains("end_date=2023-12-31"));
    }

    #[test]
    fn converts_response_and_drops_nulls() {
        let json = r#"{
            "latitude": 18.5, "longitude": 73.875,
            "daily": {
                "time": ["2024-06-01", "2024-06-02", "2024-06-03"],
                "temperature_2m_max": [31.2, null, 30.1],
                "temperature_2m_min": [22.4, 22.0, 21.8],
                "precipitation_sum": [4.5, 0.0, 12.3]
            }
        }"#;
        let response: OmResponse = serde_json::from_str(json).unwrap();
        let days = convert_daily(response.daily).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(days[1].rainfall_mm, 12.3);
    }

    #[test]
    fn mismatched_arrays_are_unavailable() {
        let daily = OmDaily {
            time: vec!["2024-06-01".into()],
            temperature_2m_max: vec![],
            temperature_2m_min: vec![Some(20.0)],
            precipitation_sum: vec![Some(0.0)],
        };
        assert!(matches!(
            convert_daily(daily),
            Err(FasalError::WeatherUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_weather_unavailable() {
        let config = WeatherConfig {
            forecast_url: "http://127.0.0.1:1/v1/forecast".into(),
            ..WeatherConfig::default()
        };
        let result = OpenMeteoClient::new(config).fetch_daily(18.5, 73.8, 16).await;
        assert!(matches!(result, Err(FasalError::WeatherUnavailable(_))));
    }

    #[tokio::test]
    async fn inverted_archive_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let result = client().fetch_archive(18.5, 73.8, start, end).await;
        assert!(matches!(result, Err(FasalError::InvalidInput(_))));
    }
}
