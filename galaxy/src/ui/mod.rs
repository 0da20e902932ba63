//! UI module for the terminal game

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
