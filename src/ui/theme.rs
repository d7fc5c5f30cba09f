//! Terminal styles, resolved once per process.
//!
//! Output that is not a terminal gets unstyled text so piped tables stay clean.

use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub dim: Style,
    /// Flag cells that are set (enabled, verified)
    pub flag_on: Style,
    /// Flag cells that are unset
    pub flag_off: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            dim: Style::new().white().dimmed(),
            flag_on: Style::new().green(),
            flag_off: Style::new().red().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            dim: Style::new(),
            flag_on: Style::new(),
            flag_off: Style::new(),
        }
    }

    /// Render a boolean column cell as `yes`/`no`
    pub fn flag(&self, value: bool) -> String {
        if value {
            "yes".style(self.flag_on.clone()).to_string()
        } else {
            "no".style(self.flag_off.clone()).to_string()
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
