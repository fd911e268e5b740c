//! Per-item disclosure menu exposing "edit" and "delete".

use serde::Serialize;

/// Estimated maximum width of an open menu, in logical pixels.
pub const ESTIMATED_MENU_WIDTH: u32 = 320;

/// Horizontal anchor of the open menu relative to its button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAlignment {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemMenu {
    open: bool,
    alignment: MenuAlignment,
}

impl Default for ItemMenu {
    fn default() -> Self {
        Self {
            open: false,
            alignment: MenuAlignment::Right,
        }
    }
}

impl ItemMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn alignment(&self) -> MenuAlignment {
        self.alignment
    }

    /// Flips the open state. On open, re-anchors the menu: if it would
    /// overflow the viewport to the right of the button it anchors left.
    pub fn toggle(&mut self, button_right: u32, viewport_width: u32) {
        self.open = !self.open;
        if self.open {
            self.alignment = if button_right.saturating_add(ESTIMATED_MENU_WIDTH) > viewport_width {
                MenuAlignment::Left
            } else {
                MenuAlignment::Right
            };
        }
    }

    /// Click outside, or an action was chosen.
    pub fn close(&mut self) {
        self.open = false;
    }
}
