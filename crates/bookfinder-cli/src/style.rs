//! Visual styling for CLI output.
//!
//! The stored theme preference picks the palette: the dark theme uses bright
//! colors meant for dark terminals, the light theme uses deeper ones.
//! Everything degrades to plain text when color is off.

use owo_colors::OwoColorize;

use bookfinder_types::{ReadingList, Theme};

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    theme: Theme,
    no_color: bool,
}

impl Palette {
    pub fn new(theme: Theme, no_color: bool) -> Self {
        Self { theme, no_color }
    }

    /// Switch to another theme, keeping the color setting.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Book titles and headings.
    pub fn title(&self, s: &str) -> String {
        if self.no_color {
            return s.to_string();
        }
        match self.theme {
            Theme::Dark => format!("{}", s.bright_white().bold()),
            Theme::Light => format!("{}", s.black().bold()),
        }
    }

    /// Authors, counts and other secondary values.
    pub fn accent(&self, s: &str) -> String {
        if self.no_color {
            return s.to_string();
        }
        match self.theme {
            Theme::Dark => format!("{}", s.bright_cyan()),
            Theme::Light => format!("{}", s.blue()),
        }
    }

    /// Keys, years and hints.
    pub fn muted(&self, s: &str) -> String {
        if self.no_color {
            return s.to_string();
        }
        format!("{}", s.dimmed())
    }

    /// Confirmation messages.
    pub fn success(&self, s: &str) -> String {
        if self.no_color {
            return s.to_string();
        }
        match self.theme {
            Theme::Dark => format!("{}", s.bright_green()),
            Theme::Light => format!("{}", s.green()),
        }
    }

    /// Warnings.
    pub fn warning(&self, s: &str) -> String {
        if self.no_color {
            return s.to_string();
        }
        match self.theme {
            Theme::Dark => format!("{}", s.bright_yellow()),
            Theme::Light => format!("{}", s.yellow()),
        }
    }

    /// The favorite marker.
    pub fn favorite_marker(&self) -> String {
        if self.no_color {
            return "*".to_string();
        }
        match self.theme {
            Theme::Dark => format!("{}", "♥".bright_red()),
            Theme::Light => format!("{}", "♥".red()),
        }
    }

    /// A short colored tag for a reading list.
    pub fn list_tag(&self, list: ReadingList) -> String {
        let label = match list {
            ReadingList::WantToRead => "want",
            ReadingList::CurrentlyReading => "reading",
            ReadingList::Completed => "done",
        };
        let tag = format!("[{}]", label);
        if self.no_color {
            return tag;
        }
        match list {
            ReadingList::WantToRead => self.accent(&tag),
            ReadingList::CurrentlyReading => self.warning(&tag),
            ReadingList::Completed => self.success(&tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_is_plain() {
        let palette = Palette::new(Theme::Dark, true);
        assert_eq!(palette.title("Dune"), "Dune");
        assert_eq!(palette.accent("Herbert"), "Herbert");
        assert_eq!(palette.favorite_marker(), "*");
        assert_eq!(palette.list_tag(ReadingList::Completed), "[done]");
    }

    #[test]
    fn test_color_adds_escape_codes() {
        let palette = Palette::new(Theme::Light, false);
        let title = palette.title("Dune");
        assert!(title.contains("Dune"));
        assert!(title.contains('\x1b'));
    }

    #[test]
    fn test_themes_differ() {
        let mut palette = Palette::new(Theme::Light, false);
        let light = palette.accent("x");
        palette.set_theme(Theme::Dark);
        assert_eq!(palette.theme(), Theme::Dark);
        assert_ne!(palette.accent("x"), light);
    }
}
