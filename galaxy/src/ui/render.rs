//! Render orchestration for the terminal game

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use galaxy_core::{GameMode, JobKind};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, BattleLayout};
use crate::ui::widgets::{AnswerWidget, BattlefieldWidget, DialogueWidget, GameOverWidget, HudWidget};

const TITLE_ART: &[&str] = &[
    r"   ___   _   _      _   __  ____   __",
    r"  / __| /_\ | |    /_\  \ \/ /\ \ / /",
    r" | (_ |/ _ \| |__ / _ \  >  <  \ V / ",
    r"  \___/_/ \_\____/_/ \_\/_/\_\  |_|  ",
];

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.game.mode() {
        GameMode::Menu => render_menu(frame, app, area),
        GameMode::StoryDialogue | GameMode::Playing => render_battle(frame, app, area),
        GameMode::GameOver => render_game_over(frame, app, area),
    }
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| Line::from(Span::styled(*row, theme.title_style())))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "银河数学学院",
        Style::default()
            .fg(theme.score)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "用乘法击落外星舰队 (1-19 x 1-19)",
        theme.text_style(),
    )));
    lines.push(Line::from(""));

    if app.game.is_loading() {
        let dots = ".".repeat(usize::from(app.animation_frame / 8) % 4);
        lines.push(Line::from(Span::styled(
            format!("正在建立通讯{dots}"),
            Style::default().fg(theme.sparky),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Enter] 开始任务    [q] 退出",
            theme.title_style(),
        )));
    }

    lines.push(Line::from(""));
    let narrator = if app.online {
        "叙事: Claude 在线"
    } else {
        "叙事: 离线模式"
    };
    lines.push(Line::from(Span::styled(narrator, theme.dim_style())));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(60, height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}

fn render_battle(frame: &mut Frame, app: &App, area: Rect) {
    let layout = BattleLayout::calculate(area);
    let state = app.game.state();
    let in_dialogue = state.mode == GameMode::StoryDialogue;

    render_title_bar(frame, app, layout.title_area);

    frame.render_widget(HudWidget::new(state, &app.theme), layout.hud_area);

    frame.render_widget(
        BattlefieldWidget::new(app.game.enemy(), &app.flashes, &app.theme)
            .frame(app.animation_frame)
            .dimmed(in_dialogue),
        layout.battlefield_area,
    );

    let incoming = matches!(app.game.pending_job(), Some(JobKind::BossApproach { .. }));
    frame.render_widget(
        AnswerWidget::new(state.current_question.as_ref(), app.game.buffer(), &app.theme)
            .feedback(app.game.feedback())
            .incoming(incoming),
        layout.answer_area,
    );

    if let Some((line, shown)) = app.visible_dialogue() {
        frame.render_widget(
            DialogueWidget::new(line, &shown, &app.theme).finished(app.typewriter.is_finished()),
            layout.dialogue_area(),
        );
    }

    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

fn render_game_over(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_fixed(64, 18, area);
    frame.render_widget(
        GameOverWidget::new(app.game.state(), &app.theme)
            .loading(app.game.is_loading(), app.animation_frame),
        popup,
    );
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(" 银河数学学院 ", app.theme.title_style())];
    if let Some(message) = app.status_message() {
        spans.push(Span::styled(
            format!(" {message}"),
            Style::default().fg(app.theme.score),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hotkeys: &[(&str, bool)] = match app.game.mode() {
        GameMode::StoryDialogue => &[("Enter/Space:继续", true), ("Ctrl+C:退出", false)],
        _ => &[
            ("0-9:输入", true),
            ("Enter:开火", true),
            ("Backspace:删除", true),
            ("c:清除", true),
            ("Ctrl+C:退出", false),
        ],
    };

    let spans: Vec<Span> = hotkeys
        .iter()
        .flat_map(|(text, primary)| {
            let style = if *primary {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            vec![Span::styled(*text, style), Span::raw("  ")]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
