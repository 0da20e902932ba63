//! Game over screen: final score and the after-action report

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use galaxy_core::GameState;

use crate::ui::theme::GameTheme;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct GameOverWidget<'a> {
    state: &'a GameState,
    loading: bool,
    frame: u8,
    theme: &'a GameTheme,
}

impl<'a> GameOverWidget<'a> {
    pub fn new(state: &'a GameState, theme: &'a GameTheme) -> Self {
        Self {
            state,
            loading: false,
            frame: 0,
            theme,
        }
    }

    /// The report is still being written.
    pub fn loading(mut self, loading: bool, frame: u8) -> Self {
        self.loading = loading;
        self.frame = frame;
        self
    }
}

impl Widget for GameOverWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" 任务失败 ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.damage));

        let mistakes = self.state.mistakes().len();
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "护盾耗尽",
                Style::default()
                    .fg(self.theme.damage)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("最终得分  ", self.theme.dim_style()),
                Span::styled(
                    self.state.score.to_string(),
                    Style::default()
                        .fg(self.theme.score)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("到达关卡  ", self.theme.dim_style()),
                Span::styled(self.state.level.to_string(), self.theme.text_style()),
                Span::styled(format!("    失误 {mistakes}"), self.theme.dim_style()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "指挥官报告",
                self.theme.character_style(galaxy_core::CharacterId::Nova),
            )),
        ];

        if self.loading || self.state.mission_briefing.is_empty() {
            let spin = SPINNER[usize::from(self.frame / 3) % SPINNER.len()];
            lines.push(Line::from(Span::styled(
                format!("{spin} 正在生成报告..."),
                self.theme.dim_style(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                self.state.mission_briefing.as_str(),
                self.theme.text_style(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] 返回基地",
            self.theme.title_style(),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
