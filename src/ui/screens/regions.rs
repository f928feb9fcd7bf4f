use crate::models::RegionProfile;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct RegionsScreen<'a> {
    pub regions: &'a [RegionProfile],
    pub current: Option<&'a str>,
    pub selected_index: usize,
}

impl<'a> RegionsScreen<'a> {
    pub fn new(regions: &'a [RegionProfile], current: Option<&'a str>) -> Self {
        Self {
            regions,
            current,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for RegionsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Regions", Theme::title()),
            Span::styled(format!(" ({})", self.regions.len()), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl RegionsScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Catalog")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let marker = if self.current == Some(region.id.as_str()) {
                    Span::styled("* ", Theme::highlight())
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![marker, Span::raw(region.id.as_str())]))
                    .style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Profile")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(region) = self.regions.get(self.selected_index) else {
            Paragraph::new(Span::styled("No regions loaded", Theme::dim())).render(inner, buf);
            return;
        };

        let textures: Vec<&str> = region
            .typical_soil_textures
            .iter()
            .map(|t| t.as_str())
            .collect();
        let seasons: Vec<&str> = region.supported_seasons.iter().map(|s| s.as_str()).collect();

        let mut lines = vec![
            Line::from(Span::styled(&region.name, Theme::header())),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Location: ", Theme::dim()),
                Span::styled(
                    format!("{:.4}, {:.4}", region.latitude, region.longitude),
                    Theme::normal(),
                ),
                Span::styled(format!("  {} m", region.elevation_m), Theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("Climate: ", Theme::dim()),
                Span::styled(&region.climate_zone, Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Soils: ", Theme::dim()),
                Span::styled(textures.join(", "), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Seasons: ", Theme::dim()),
                Span::styled(seasons.join(", "), Theme::normal()),
            ]),
        ];

        if let Some(ref soil) = region.default_soil {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(Span::styled("Default soil:", Theme::dim())));
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} pH {:.1}, organic matter {}, drainage {}",
                    soil.texture,
                    soil.ph,
                    soil.organic_matter,
                    soil.drainage.map(|d| d.as_str()).unwrap_or("unknown")
                ),
                Theme::normal(),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_regions;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn marks_current_region_and_shows_selection() {
        let regions = default_regions();
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        RegionsScreen::new(&regions, Some("SOLAPUR"))
            .with_selection(1)
            .render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("* SOLAPUR"));
        assert!(rendered.contains("Solapur District"));
        assert!(rendered.contains("Semi-Arid"));
    }
}
