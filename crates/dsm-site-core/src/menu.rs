//! Mobile navigation menu.

/// SVG path for the closed-menu (hamburger) icon.
pub const HAMBURGER_PATH: &str = "M4 6h16M4 12h16M4 18h16";
/// SVG path for the open-menu (X) icon.
pub const CLOSE_PATH: &str = "M6 18L18 6M6 6l12 12";

/// Delay before fading in after `hidden` is removed.
pub const FADE_IN_DELAY_MS: u32 = 10;
/// Fade-out duration before the panel is hidden.
pub const FADE_OUT_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

impl MenuState {
    /// The panel's `hidden` class is the source of truth.
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden { MenuState::Closed } else { MenuState::Open }
    }

    pub fn toggled(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }

    pub fn icon_path(self) -> &'static str {
        match self {
            MenuState::Open => CLOSE_PATH,
            MenuState::Closed => HAMBURGER_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_and_icons() {
        let closed = MenuState::from_hidden(true);
        assert_eq!(closed, MenuState::Closed);
        assert_eq!(closed.icon_path(), HAMBURGER_PATH);
        let open = closed.toggled();
        assert_eq!(open, MenuState::Open);
        assert_eq!(open.icon_path(), CLOSE_PATH);
        assert_eq!(open.toggled(), MenuState::Closed);
    }
}
