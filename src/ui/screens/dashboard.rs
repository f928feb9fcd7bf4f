use crate::logic::season::SeasonReport;
use crate::logic::Advice;
use crate::ui::components::{dry_spell_gauge, rainfall_gauge, score_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub advice: Option<&'a Advice>,
    pub season: &'a SeasonReport,
    pub status_message: Option<&'a str>,
    pub refreshing: bool,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(advice: Option<&'a Advice>, season: &'a SeasonReport) -> Self {
        Self {
            advice,
            season,
            status_message: None,
            refreshing: false,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    pub fn refreshing(mut self, refreshing: bool) -> Self {
        self.refreshing = refreshing;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Main layout: header, gauges, season + top crops, status, nav
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Season and top crops
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        self.render_season(middle[0], buf);
        self.render_top_crops(middle[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.advice {
            Some(a) => format!(
                "fasal - {} ({}) - {} season",
                a.region_name, a.region_id, a.season
            ),
            None => format!("fasal - {} season", self.season.season),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = match self.advice {
            Some(a) => Line::from(vec![
                Span::styled(
                    format!(
                        "Soil: {} pH {:.1} ({})  Irrigation: {}  Forecast days: {}  ",
                        a.soil.texture,
                        a.soil.ph,
                        a.soil_source.as_str(),
                        a.irrigation,
                        a.weather_days
                    ),
                    Theme::dim(),
                ),
                Span::styled(
                    format!("Dry-spell risk: {}", a.outlook.dry_spell_risk),
                    Style::default().fg(Theme::dry_spell(a.outlook.dry_spell_risk)),
                ),
            ]),
            None if self.refreshing => {
                Line::from(Span::styled("Fetching forecast...", Theme::dim()))
            }
            None => Line::from(Span::styled("No forecast loaded", Theme::dim())),
        };
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let outlook = self.advice.map(|a| &a.outlook);

        temperature_gauge("Expected Temp", outlook.map(|o| o.expected_avg_temp))
            .render(gauge_chunks[0], buf);
        rainfall_gauge("Expected Rain", outlook.map(|o| o.expected_rainfall_mm))
            .render(gauge_chunks[1], buf);
        dry_spell_gauge("Max Dry Spell", outlook.map(|o| o.max_dry_spell as f64))
            .render(gauge_chunks[2], buf);

        let best = self
            .advice
            .and_then(|a| a.recommendations.first())
            .map(|r| r.suitability_score);
        score_gauge("Best Score", best).render(gauge_chunks[3], buf);
    }

    fn render_season(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Season", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let report = self.season;
        let mut lines = vec![Line::from(vec![
            Span::styled(
                report.season.as_str(),
                Style::default()
                    .fg(Theme::season(report.season))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ends {}", report.season_end), Theme::dim()),
        ])];

        if let Some(next) = report.next_season {
            lines.push(Line::from(Span::styled(
                format!("Transition: {} approaching", next),
                Theme::warning(),
            )));
        }
        if let Some(ref window) = report.planting_window {
            let style = if window.contains(report.date) {
                Theme::success()
            } else {
                Theme::dim()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "Planting: {} to {}",
                    window.start.format("%d %b"),
                    window.end.format("%d %b")
                ),
                style,
            )));
        }
        lines.push(Line::from(vec![]));

        let guidance = self
            .advice
            .map(|a| a.guidance.as_str())
            .unwrap_or(report.guidance.as_str());
        lines.push(Line::from(Span::styled(guidance, Theme::normal())));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_top_crops(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Top Crops", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let recs = match self.advice {
            Some(a) if !a.recommendations.is_empty() => a.top(5),
            Some(_) => {
                Paragraph::new(Span::styled(
                    "No crop passed the season, region and soil filters",
                    Theme::dim(),
                ))
                .render(inner, buf);
                return;
            }
            None => {
                Paragraph::new(Span::styled("Press r to fetch the forecast", Theme::dim()))
                    .render(inner, buf);
                return;
            }
        };

        let items: Vec<ListItem> = recs
            .iter()
            .map(|r| {
                let score_style = Style::default().fg(Theme::suitability(r.suitability_score));
                let title_line = Line::from(vec![
                    Span::styled(format!("{:>5.1} ", r.suitability_score), score_style),
                    Span::styled(&r.crop, Theme::normal()),
                    Span::styled(format!("  {} days", r.growth_duration_days), Theme::dim()),
                ]);
                let risk_style = r
                    .risks
                    .first()
                    .map(|flag| Style::default().fg(Theme::risk(*flag)))
                    .unwrap_or_else(Theme::dim);
                let risk_line = Line::from(vec![
                    Span::styled("      ", Theme::dim()),
                    Span::styled(&r.risk_note, risk_style),
                ]);
                ListItem::new(vec![title_line, risk_line])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Crops ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Regions ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}
