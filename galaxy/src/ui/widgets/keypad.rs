//! Question and answer panel

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use galaxy_core::answer::MAX_DIGITS;
use galaxy_core::{AnswerBuffer, Question};

use crate::ui::theme::GameTheme;

pub struct AnswerWidget<'a> {
    question: Option<&'a Question>,
    buffer: &'a AnswerBuffer,
    feedback: Option<&'a str>,
    incoming: bool,
    theme: &'a GameTheme,
}

impl<'a> AnswerWidget<'a> {
    pub fn new(question: Option<&'a Question>, buffer: &'a AnswerBuffer, theme: &'a GameTheme) -> Self {
        Self {
            question,
            buffer,
            feedback: None,
            incoming: false,
            theme,
        }
    }

    pub fn feedback(mut self, feedback: Option<&'a str>) -> Self {
        self.feedback = feedback;
        self
    }

    /// A boss transmission is loading; firing is locked.
    pub fn incoming(mut self, incoming: bool) -> Self {
        self.incoming = incoming;
        self
    }
}

impl Widget for AnswerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" 火控系统 ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(!self.incoming));

        let question = self
            .question
            .map(|q| format!("{} x {} = ", q.factor_a, q.factor_b))
            .unwrap_or_default();
        let typed = self.buffer.to_string();
        let blanks = "_".repeat(MAX_DIGITS.saturating_sub(typed.len()));

        let mut lines = vec![Line::from(vec![
            Span::styled(question, self.theme.text_style().add_modifier(Modifier::BOLD)),
            Span::styled(
                typed,
                Style::default()
                    .fg(self.theme.laser)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(blanks, self.theme.dim_style()),
        ])];

        if self.incoming {
            lines.push(Line::from(Span::styled(
                "收到通讯信号...",
                Style::default()
                    .fg(self.theme.sparky)
                    .add_modifier(Modifier::SLOW_BLINK),
            )));
        } else if let Some(feedback) = self.feedback {
            lines.push(Line::from(Span::styled(
                feedback,
                Style::default()
                    .fg(self.theme.damage)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
