use crate::ui::{Band, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const FILLED: char = '█';
const EMPTY: char = '░';
const MARKER: char = '┃';

/// Boxed reading with a colored bar; the band label names where the value sits.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    bands: &'a [Band],
    precision: usize,
    marker: Option<f64>,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            bands: &[],
            precision: 1,
            marker: None,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn bands(mut self, bands: &'a [Band]) -> Self {
        self.bands = bands;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Draws a tick on the bar at a reference value such as a suitability cut-off.
    pub fn marker(mut self, at: f64) -> Self {
        self.marker = Some(at);
        self
    }

    fn band(&self, value: f64) -> Option<&Band> {
        Band::lookup(self.bands, value)
    }

    fn color(&self, value: f64) -> Color {
        self.band(value).map(|b| b.color).unwrap_or(Theme::FG)
    }

    fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn render_bar(&self, value: f64, bar: Rect, buf: &mut Buffer) {
        let color = self.color(value);
        let filled = (bar.width as f64 * self.ratio(value)) as u16;
        for offset in 0..bar.width {
            let ch = if offset < filled { FILLED } else { EMPTY };
            buf[(bar.x + offset, bar.y)].set_char(ch).set_fg(color);
        }

        if let Some(at) = self.marker {
            let offset = ((bar.width as f64 * self.ratio(at)) as u16).min(bar.width - 1);
            buf[(bar.x + offset, bar.y)]
                .set_char(MARKER)
                .set_fg(self.color(at));
        }
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            Paragraph::new(Span::styled("N/A", Theme::dim())).render(inner, buf);
            return;
        };

        let mut reading = vec![Span::styled(
            format!("{:.prec$}{}", value, self.unit, prec = self.precision),
            Style::default().fg(self.color(value)),
        )];
        if let Some(band) = self.band(value) {
            reading.push(Span::styled(format!("  {}", band.label), Theme::dim()));
        }
        Paragraph::new(Line::from(reading)).render(inner, buf);

        if inner.height >= 2 {
            let bar = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            self.render_bar(value, bar, buf);
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(0.0, 45.0)
        .bands(Theme::TEMPERATURE_BANDS)
}

/// Expected rainfall over the planning horizon.
pub fn rainfall_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "mm")
        .range(0.0, 1000.0)
        .precision(0)
        .bands(Theme::RAINFALL_BANDS)
}

pub fn dry_spell_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " d")
        .range(0.0, 15.0)
        .precision(0)
        .bands(Theme::DRY_SPELL_BANDS)
}

pub fn score_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "")
        .range(0.0, 100.0)
        .bands(Theme::SCORE_BANDS)
        .marker(Theme::SUITABLE_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn color_comes_from_highest_band_reached() {
        let gauge = dry_spell_gauge("Dry spell", Some(6.0));
        assert_eq!(gauge.color(0.0), Theme::GOOD);
        assert_eq!(gauge.color(6.0), Theme::FAIR);
        assert_eq!(gauge.color(8.0), Theme::POOR);
        assert_eq!(GaugeWidget::new("x", None, "").color(3.0), Theme::FG);
    }

    #[test]
    fn score_bar_shows_suitability_cut_off() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        score_gauge("Score", Some(50.0)).render(area, &mut buf);

        assert!(row(&buf, 1).contains("50.0"));
        let bar = row(&buf, 2);
        assert_eq!(bar.matches(FILLED).count(), 5);
        assert_eq!(bar.matches(EMPTY).count(), 4);
        assert_eq!(buf[(9, 2)].symbol(), MARKER.to_string());
    }

    #[test]
    fn reading_carries_band_label() {
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);
        rainfall_gauge("Rain", Some(450.0)).render(area, &mut buf);
        assert!(row(&buf, 1).contains("450mm  adequate"));
    }

    #[test]
    fn missing_value_renders_na() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        rainfall_gauge("Rain", None).render(area, &mut buf);
        assert!(row(&buf, 1).contains("N/A"));
    }
}
