//! Heads-up display: score, level, combo and shield bar

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use galaxy_core::GameState;

use crate::ui::theme::GameTheme;

pub struct HudWidget<'a> {
    state: &'a GameState,
    theme: &'a GameTheme,
}

impl<'a> HudWidget<'a> {
    pub fn new(state: &'a GameState, theme: &'a GameTheme) -> Self {
        Self { state, theme }
    }
}

impl Widget for HudWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        let mut spans = vec![
            Span::styled("得分 ", self.theme.dim_style()),
            Span::styled(
                self.state.score.to_string(),
                Style::default()
                    .fg(self.theme.score)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("关卡 ", self.theme.dim_style()),
            Span::styled(self.state.level.to_string(), self.theme.text_style()),
        ];
        if self.state.combo > 1 {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} 连击!", self.state.combo),
                Style::default()
                    .fg(self.theme.combo)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(spans)).render(chunks[0], buf);

        let ratio = self.state.health_ratio();
        Gauge::default()
            .gauge_style(Style::default().fg(self.theme.shield_color(ratio)))
            .ratio(f64::from(ratio).clamp(0.0, 1.0))
            .label(format!(
                "护盾 {}/{}",
                self.state.health, self.state.max_health
            ))
            .render(chunks[1], buf);
    }
}
