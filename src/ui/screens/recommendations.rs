use crate::models::Recommendation;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct RecommendationsScreen<'a> {
    pub recommendations: &'a [Recommendation],
    pub selected_index: usize,
}

impl<'a> RecommendationsScreen<'a> {
    pub fn new(recommendations: &'a [Recommendation]) -> Self {
        Self {
            recommendations,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for RecommendationsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crop Recommendations", Theme::title()),
            Span::styled(
                format!(" ({} ranked)", self.recommendations.len()),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        // Content: list on left, details on right
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl RecommendationsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Ranking")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            Paragraph::new(Span::styled("No recommendations", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };

                let line = Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Theme::dim()),
                    Span::styled(
                        format!("{:>5.1} ", rec.suitability_score),
                        Style::default().fg(Theme::suitability(rec.suitability_score)),
                    ),
                    Span::raw(rec.crop.as_str()),
                ]);

                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rec = match self.recommendations.get(self.selected_index) {
            Some(r) => r,
            None => {
                Paragraph::new(Span::styled(
                    "Select a crop to view its breakdown",
                    Theme::dim(),
                ))
                .render(inner, buf);
                return;
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(&rec.crop, Theme::header()),
                Span::styled(format!("  {}", rec.crop_id), Theme::dim()),
            ]),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Score: ", Theme::dim()),
                Span::styled(
                    format!("{:.1}", rec.suitability_score),
                    Style::default().fg(Theme::suitability(rec.suitability_score)),
                ),
                Span::styled("  Duration: ", Theme::dim()),
                Span::styled(format!("{} days", rec.growth_duration_days), Theme::normal()),
                Span::styled("  Region fit: ", Theme::dim()),
                Span::styled(format!("{:.2}", rec.regional_suitability), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Water: ", Theme::dim()),
                Span::styled(format!("{:.0} mm", rec.water_required_mm), Theme::normal()),
                Span::styled("  Rain: ", Theme::dim()),
                Span::styled(format!("{:.0} mm", rec.expected_rainfall_mm), Theme::normal()),
                Span::styled("  Irrigate: ", Theme::dim()),
                Span::styled(format!("{:.0} mm", rec.irrigation_needed_mm), Theme::highlight()),
            ]),
            Line::from(vec![]),
            Line::from(Span::styled("Factors:", Theme::dim())),
        ];

        for factor in &rec.breakdown {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<22}", factor.name), Theme::dim()),
                Span::styled(format!("{:>5.1}", factor.score), Theme::normal()),
                Span::styled(
                    format!("  x{:.2} = {:.1}", factor.weight, factor.contribution()),
                    Theme::dim(),
                ),
            ]));
        }
        lines.push(Line::from(vec![]));

        let mut risk_line = vec![Span::styled("Risk: ", Theme::dim())];
        if rec.is_low_risk() {
            risk_line.push(Span::styled(&rec.risk_note, Theme::success()));
        } else {
            for (i, flag) in rec.risks.iter().enumerate() {
                if i > 0 {
                    risk_line.push(Span::styled(", ", Theme::dim()));
                }
                risk_line.push(Span::styled(
                    flag.as_str(),
                    Style::default().fg(Theme::risk(*flag)),
                ));
            }
        }
        lines.push(Line::from(risk_line));

        if !rec.amendments.is_empty() {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(Span::styled("Soil amendments:", Theme::dim())));
            for amendment in &rec.amendments {
                lines.push(Line::from(Span::styled(
                    format!("  - {}", amendment),
                    Theme::success(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
