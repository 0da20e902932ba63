//! Layout calculations for the terminal game

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the in-flight screen
pub struct BattleLayout {
    pub title_area: Rect,
    pub hud_area: Rect,
    pub battlefield_area: Rect,
    pub answer_area: Rect,
    pub hotkey_bar: Rect,
}

impl BattleLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // HUD
                Constraint::Min(8),    // Battlefield
                Constraint::Length(5), // Question + answer
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            hud_area: chunks[1],
            battlefield_area: chunks[2],
            answer_area: chunks[3],
            hotkey_bar: chunks[4],
        }
    }

    /// Dialogue box across the bottom of the battlefield
    pub fn dialogue_area(&self) -> Rect {
        let height = 7.min(self.battlefield_area.height);
        Rect::new(
            self.battlefield_area.x,
            self.battlefield_area.y + self.battlefield_area.height - height,
            self.battlefield_area.width,
            height,
        )
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_layout_fills_screen() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = BattleLayout::calculate(area);
        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.hud_area.height, 3);
        assert_eq!(layout.answer_area.height, 5);
        assert_eq!(layout.battlefield_area.height, 20);
        assert_eq!(layout.dialogue_area().y, layout.battlefield_area.bottom() - 7);
    }

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect_fixed(40, 4, area);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.y, 3);
    }
}
