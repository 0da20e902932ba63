//! The battlefield: starfield, enemy ship, player ship and laser

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use galaxy_core::{Enemy, EnemyKind};

use crate::app::Flashes;
use crate::ui::theme::GameTheme;

const SCOUT_ART: &[&str] = &[r" \_^_/ ", r"  <o>  "];
const BATTLESHIP_ART: &[&str] = &[r" __/^\__ ", r"<=[###]=>", r"  \/ \/  "];
const BOSS_ART: &[&str] = &[
    r"  ___/MMM\___  ",
    r" /=[ X  X ]=\ ",
    r"<<===[###]===>>",
    r"   \/\/ \/\/   ",
];
const PLAYER_ART: &[&str] = &["  /^\\  ", " /___\\ "];

fn ship_art(kind: EnemyKind) -> &'static [&'static str] {
    match kind {
        EnemyKind::Scout => SCOUT_ART,
        EnemyKind::Battleship => BATTLESHIP_ART,
        EnemyKind::Boss => BOSS_ART,
    }
}

pub struct BattlefieldWidget<'a> {
    enemy: Option<&'a Enemy>,
    flashes: &'a Flashes,
    theme: &'a GameTheme,
    frame: u8,
    dimmed: bool,
}

impl<'a> BattlefieldWidget<'a> {
    pub fn new(enemy: Option<&'a Enemy>, flashes: &'a Flashes, theme: &'a GameTheme) -> Self {
        Self {
            enemy,
            flashes,
            theme,
            frame: 0,
            dimmed: false,
        }
    }

    /// Animation frame for the scrolling starfield.
    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }

    /// Draw everything dimmed (behind a dialogue box).
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn render_stars(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.theme.star)
            .add_modifier(Modifier::DIM);
        let drift = u16::from(self.frame / 4);
        for i in 0..(area.width as u32 * area.height as u32 / 24) {
            let x = (i * 37 + 11) % area.width.max(1) as u32;
            let y = (i * 17 + u32::from(drift)) % area.height.max(1) as u32;
            let glyph = if i % 5 == 0 { "+" } else { "." };
            buf.set_string(area.x + x as u16, area.y + y as u16, glyph, style);
        }
    }

    fn render_art(
        &self,
        art: &[&str],
        center_x: u16,
        top: u16,
        style: Style,
        area: Rect,
        buf: &mut Buffer,
    ) {
        for (row, text) in art.iter().enumerate() {
            let y = top + row as u16;
            if y >= area.bottom() {
                break;
            }
            let width = text.chars().count() as u16;
            let x = center_x.saturating_sub(width / 2).max(area.x);
            buf.set_string(x, y, text, style);
        }
    }
}

impl Widget for BattlefieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.flashes.player_hit() {
                Style::default().fg(self.theme.damage)
            } else {
                self.theme.border_style(false)
            });
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 4 || inner.width < 16 {
            return;
        }

        self.render_stars(inner, buf);
        let center_x = inner.x + inner.width / 2;

        if let Some(enemy) = self.enemy {
            let mut style = Style::default().fg(self.theme.enemy_color(enemy.color));
            if self.flashes.enemy_hit() {
                style = Style::default()
                    .fg(self.theme.hit_flash)
                    .add_modifier(Modifier::BOLD);
            }
            self.render_art(ship_art(enemy.kind), center_x, inner.y + 1, style, inner, buf);

            let hp = format!(
                "{} {}{}",
                enemy.kind.name(),
                "■".repeat(enemy.hp as usize),
                "□".repeat(enemy.max_hp.saturating_sub(enemy.hp) as usize)
            );
            let width = hp.chars().count() as u16;
            buf.set_string(
                center_x.saturating_sub(width / 2),
                inner.y,
                hp,
                Style::default().fg(self.theme.enemy_color(enemy.color)),
            );
        }

        let player_top = inner.bottom().saturating_sub(PLAYER_ART.len() as u16);
        let player_style = if self.flashes.player_hit() {
            Style::default().fg(self.theme.damage)
        } else {
            Style::default().fg(self.theme.player_ship)
        };
        self.render_art(PLAYER_ART, center_x, player_top, player_style, inner, buf);

        if self.flashes.laser() {
            let art_height = self.enemy.map(|e| ship_art(e.kind).len()).unwrap_or(0) as u16;
            let laser_style = Style::default()
                .fg(self.theme.laser)
                .add_modifier(Modifier::BOLD);
            for y in (inner.y + 1 + art_height)..player_top {
                buf.set_string(center_x, y, "┃", laser_style);
            }
        }

        if self.dimmed {
            buf.set_style(inner, Style::default().add_modifier(Modifier::DIM));
        }
    }
}
