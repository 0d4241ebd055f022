//! Color mode detection and row styling.

use crossterm::style::{Color, StyledContent, Stylize};

use crate::policy::Recency;

/// Terminal color capability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 16 ANSI colors.
    #[default]
    Color16,
    /// Monochrome: no SGR sequences at all.
    Mono,
}

impl ColorMode {
    /// Auto-detect from `NO_COLOR` and `TERM`.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with_env(std::env::var("NO_COLOR").ok(), std::env::var("TERM").ok())
    }

    /// Testable core of [`ColorMode::detect`].
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn detect_with_env(no_color: Option<String>, term: Option<String>) -> Self {
        if no_color.is_some_and(|v| !v.is_empty()) {
            return Self::Mono;
        }
        match term.as_deref() {
            Some("dumb") | None => Self::Mono,
            _ => Self::Color16,
        }
    }

    fn paint(self, content: StyledContent<&str>) -> String {
        match self {
            Self::Mono => (*content.content()).to_string(),
            Self::Color16 => content.to_string(),
        }
    }

    /// Bold blue product name.
    pub fn title(self, text: &str) -> String {
        self.paint(text.bold().blue())
    }

    pub fn header(self, text: &str) -> String {
        self.paint(text.underlined())
    }

    /// Wrap a whole table row in its recency color.
    pub fn row(self, text: &str, recency: Recency) -> String {
        match recency_color(recency) {
            Some(color) => self.paint(text.with(color)),
            None => text.to_string(),
        }
    }
}

/// Foreground color for a recency class; `Normal` rows are unstyled.
pub const fn recency_color(recency: Recency) -> Option<Color> {
    match recency {
        Recency::New => Some(Color::DarkGreen),
        Recency::Recent => Some(Color::DarkYellow),
        Recency::Expiring => Some(Color::DarkRed),
        Recency::Normal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_dumb_terminal() {
        assert_eq!(
            ColorMode::detect_with_env(None, Some("dumb".into())),
            ColorMode::Mono
        );
        assert_eq!(ColorMode::detect_with_env(None, None), ColorMode::Mono);
    }

    #[test]
    fn test_detect_xterm() {
        assert_eq!(
            ColorMode::detect_with_env(None, Some("xterm-256color".into())),
            ColorMode::Color16
        );
    }

    #[test]
    fn test_no_color_wins() {
        assert_eq!(
            ColorMode::detect_with_env(Some("1".into()), Some("xterm".into())),
            ColorMode::Mono
        );
        // Empty NO_COLOR is ignored
        assert_eq!(
            ColorMode::detect_with_env(Some(String::new()), Some("xterm".into())),
            ColorMode::Color16
        );
    }

    #[test]
    fn test_mono_emits_no_escapes() {
        let mode = ColorMode::Mono;
        assert_eq!(mode.title("HydraWatch"), "HydraWatch");
        assert_eq!(mode.header("RSSI ^"), "RSSI ^");
        assert_eq!(mode.row("a | b", Recency::New), "a | b");
    }

    #[test]
    fn test_color_wraps_and_resets() {
        let mode = ColorMode::Color16;
        let styled = mode.row("a | b", Recency::Expiring);
        assert!(styled.starts_with('\x1b'));
        assert!(styled.contains("a | b"));
        assert!(!styled.ends_with("a | b"));
        assert_eq!(mode.row("plain", Recency::Normal), "plain");
    }

    #[test]
    fn test_recency_colors() {
        assert_eq!(recency_color(Recency::New), Some(Color::DarkGreen));
        assert_eq!(recency_color(Recency::Recent), Some(Color::DarkYellow));
        assert_eq!(recency_color(Recency::Expiring), Some(Color::DarkRed));
        assert_eq!(recency_color(Recency::Normal), None);
    }
}
