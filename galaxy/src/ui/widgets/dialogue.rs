//! Story dialogue box with the typewriter reveal

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use galaxy_core::{DialogueLine, Mood};

use crate::ui::theme::GameTheme;

pub struct DialogueWidget<'a> {
    line: &'a DialogueLine,
    shown: &'a str,
    finished: bool,
    theme: &'a GameTheme,
}

impl<'a> DialogueWidget<'a> {
    pub fn new(line: &'a DialogueLine, shown: &'a str, theme: &'a GameTheme) -> Self {
        Self {
            line,
            shown,
            finished: false,
            theme,
        }
    }

    /// Whether the whole line is visible.
    pub fn finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }
}

fn mood_marker(mood: Option<Mood>) -> &'static str {
    match mood {
        Some(Mood::Happy) => " ^_^",
        Some(Mood::Angry) => " >:(",
        Some(Mood::Worried) => " ;_;",
        Some(Mood::Neutral) | None => "",
    }
}

impl Widget for DialogueWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let profile = self.line.character_id.profile();
        let name_style = self.theme.character_style(self.line.character_id);
        let title = Line::from(vec![
            Span::styled(format!(" {}", profile.name), name_style),
            Span::styled(format!(" · {} ", profile.role), self.theme.dim_style()),
        ]);

        let block = Block::default()
            .title(title)
            .title_bottom(if self.finished {
                Line::from(Span::styled(" Enter ▸ ", self.theme.dim_style()))
            } else {
                Line::default()
            })
            .borders(Borders::ALL)
            .border_style(name_style);

        let text = Line::from(vec![
            Span::styled(self.shown, self.theme.text_style()),
            Span::styled(mood_marker(self.line.mood), self.theme.dim_style()),
        ]);

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
