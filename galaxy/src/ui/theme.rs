//! Color theme and styling for the terminal game

use galaxy_core::enemy::Rgb;
use galaxy_core::CharacterId;
use ratatui::style::{Color, Modifier, Style};

/// Shield fraction below which the bar turns red.
pub const SHIELD_WARNING: f32 = 0.3;

/// Game UI color theme
#[derive(Debug, Clone)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub dim: Color,

    // HUD colors
    pub shield_ok: Color,
    pub shield_low: Color,
    pub score: Color,
    pub combo: Color,

    // Battle colors
    pub laser: Color,
    pub hit_flash: Color,
    pub damage: Color,
    pub player_ship: Color,
    pub star: Color,

    // Cast colors
    pub nova: Color,
    pub sparky: Color,
    pub chaos: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            dim: Color::DarkGray,

            shield_ok: Color::Cyan,
            shield_low: Color::Red,
            score: Color::Yellow,
            combo: Color::LightMagenta,

            laser: Color::LightCyan,
            hit_flash: Color::White,
            damage: Color::LightRed,
            player_ship: Color::LightBlue,
            star: Color::Gray,

            nova: Color::Cyan,
            sparky: Color::Yellow,
            chaos: Color::LightRed,
        }
    }
}

impl GameTheme {
    /// Shield bar color based on ratio
    pub fn shield_color(&self, ratio: f32) -> Color {
        if ratio < SHIELD_WARNING {
            self.shield_low
        } else {
            self.shield_ok
        }
    }

    pub fn enemy_color(&self, rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Name style for a speaking character
    pub fn character_style(&self, id: CharacterId) -> Style {
        let color = match id {
            CharacterId::Nova => self.nova,
            CharacterId::Sparky => self.sparky,
            CharacterId::Chaos => self.chaos,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_turns_red_below_thirty_percent() {
        let theme = GameTheme::default();
        assert_eq!(theme.shield_color(1.0), theme.shield_ok);
        assert_eq!(theme.shield_color(0.4), theme.shield_ok);
        assert_eq!(theme.shield_color(0.2), theme.shield_low);
    }
}
