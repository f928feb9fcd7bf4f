use crate::config::Config;
use crate::datasources::WeatherSource;
use crate::error::{FasalError, Result};
use crate::logic::season::SeasonReport;
use crate::logic::{Advice, AdviceRequest, Advisor};
use crate::models::{Recommendation, RegionProfile};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Recommendations,
    Regions,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Recommendations),
            '3' => Some(Screen::Regions),
            _ => None,
        }
    }
}

/// Cursor over a list rendered by one of the screens.
#[derive(Debug, Default)]
pub struct ListState {
    pub selected_index: usize,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }
}

pub struct App<W: WeatherSource> {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub advisor: Advisor<W>,

    // Data
    pub season: SeasonReport,
    pub advice: Option<Advice>,

    // Screen states
    pub recommendations_state: ListState,
    pub regions_state: ListState,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
}

impl<W: WeatherSource> App<W> {
    pub fn new(config: Config, advisor: Advisor<W>, today: NaiveDate) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            advisor,
            season: SeasonReport::for_date(today),
            advice: None,
            recommendations_state: ListState::new(),
            regions_state: ListState::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: true,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing forecast...");
    }

    /// The configured farm as an advice request.
    pub fn advice_request(&self) -> Result<AdviceRequest> {
        let farm = &self.config.farm;
        let location = farm.location().ok_or_else(|| {
            FasalError::Config("farm.region_id or farm.latitude/longitude must be set".into())
        })?;
        Ok(AdviceRequest::new(location)
            .with_soil(farm.soil.clone())
            .with_irrigation(farm.irrigation)
            .with_planning_days(farm.planning_days))
    }

    /// Re-run the advisor. On failure the previous advice stays on screen.
    pub async fn refresh(&mut self, today: NaiveDate) {
        self.needs_refresh = false;
        self.refreshing = true;
        self.season = SeasonReport::for_date(today);

        let result = match self.advice_request() {
            Ok(request) => self.advisor.advise(request, today).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(advice) => {
                let message = format!(
                    "{}: {} crops analysed",
                    advice.region_name, advice.total_analyzed
                );
                self.recommendations_state.clamp(advice.recommendations.len());
                self.advice = Some(advice);
                self.set_status(&message);
            }
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                self.set_status(&format!("Refresh failed: {}", e));
            }
        }
        self.refreshing = false;
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self.advice {
            Some(ref advice) => &advice.recommendations,
            None => &[],
        }
    }

    pub fn selected_recommendation(&self) -> Option<&Recommendation> {
        self.recommendations()
            .get(self.recommendations_state.selected_index)
    }

    pub fn regions(&self) -> &[RegionProfile] {
        self.advisor.regions().all()
    }

    pub fn current_region_id(&self) -> Option<&str> {
        match self.advice {
            Some(ref advice) => Some(advice.region_id.as_str()),
            None => self.config.farm.region_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CropCatalog, RegionCatalog};
    use crate::logic::RecommendationEngine;
    use crate::models::DailyWeather;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Toggle {
        online: AtomicBool,
    }

    impl WeatherSource for Toggle {
        async fn fetch_daily(&self, _lat: f64, _lon: f64, days: u32) -> Result<Vec<DailyWeather>> {
            if !self.online.load(Ordering::SeqCst) {
                return Err(FasalError::WeatherUnavailable("offline".into()));
            }
            let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
            Ok((0..days)
                .map(|i| DailyWeather::new(start + chrono::Duration::days(i as i64), 31.0, 23.0, 6.0))
                .collect())
        }
    }

    fn app(online: bool) -> App<Toggle> {
        let advisor = Advisor::new(
            RecommendationEngine::new(Arc::new(CropCatalog::builtin())),
            Arc::new(RegionCatalog::builtin()),
            Toggle {
                online: AtomicBool::new(online),
            },
            16,
            100.0,
        );
        App::new(Config::default(), advisor, today())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()
    }

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('1'), Some(Screen::Dashboard));
        assert_eq!(Screen::from_key('2'), Some(Screen::Recommendations));
        assert_eq!(Screen::from_key('3'), Some(Screen::Regions));
        assert_eq!(Screen::from_key('4'), None);
    }

    #[test]
    fn list_state_stays_in_bounds() {
        let mut state = ListState::new();
        state.prev();
        assert_eq!(state.selected_index, 0);
        for _ in 0..5 {
            state.next(3);
        }
        assert_eq!(state.selected_index, 2);
        state.clamp(1);
        assert_eq!(state.selected_index, 0);
        state.next(0);
        assert_eq!(state.selected_index, 0);
    }

    #[tokio::test]
    async fn refresh_loads_advice() {
        let mut app = app(true);
        assert!(app.needs_refresh);
        app.refresh(today()).await;

        assert!(!app.needs_refresh);
        assert!(!app.refreshing);
        let advice = app.advice.as_ref().unwrap();
        assert_eq!(advice.region_id, "PUNE");
        assert!(!app.recommendations().is_empty());
        assert!(app.selected_recommendation().is_some());
        assert_eq!(app.current_region_id(), Some("PUNE"));
        assert!(app.status_message.as_deref().unwrap().contains("crops analysed"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_advice() {
        let mut app = app(true);
        app.refresh(today()).await;
        let before = app.recommendations().len();

        app.advisor.source().online.store(false, Ordering::SeqCst);
        app.request_refresh();
        app.refresh(today()).await;

        assert_eq!(app.recommendations().len(), before);
        assert!(app.status_message.as_deref().unwrap().starts_with("Refresh failed"));
    }

    #[tokio::test]
    async fn missing_location_is_reported() {
        let mut app = app(true);
        app.config.farm.region_id = None;
        app.refresh(today()).await;
        assert!(app.advice.is_none());
        assert!(app.status_message.as_deref().unwrap().contains("farm.region_id"));
    }
}
