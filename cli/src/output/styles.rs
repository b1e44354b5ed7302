//! Stylesheet for terminal output.

use owo_colors::Style;

/// One `owo_colors::Style` per kind of output line; plain by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct Styles {
    pub ok: Style,
    pub attention: Style,
    pub note: Style,
    pub muted: Style,
    /// Job labels inside messages.
    pub label: Style,
}

impl Styles {
    /// No styling at all; same as `Styles::default()`.
    pub const PLAIN: Self = Self {
        ok: Style::new(),
        attention: Style::new(),
        note: Style::new(),
        muted: Style::new(),
        label: Style::new(),
    };

    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            attention: Style::new().yellow(),
            note: Style::new().cyan(),
            muted: Style::new().dimmed(),
            label: Style::new().bold(),
        }
    }
}
