//! Terminal styling for command output

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout should receive ANSI colours.
pub fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Styles for the different parts of command output.
///
/// Text is returned unchanged when colour is not supported.
pub trait Paint {
    /// A date heading in the timeline (blue, bold).
    fn heading(&self) -> String;
    /// A tag (amber).
    fn tag(&self) -> String;
    /// Secondary details such as identifiers.
    fn muted(&self) -> String;
    /// A passing check (green).
    fn ok(&self) -> String;
    /// A failing check (red).
    fn failed(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Paint for T {
    fn heading(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().bold().to_string())
    }

    fn tag(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn muted(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }

    fn ok(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn failed(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Red>().to_string())
    }
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if color_enabled() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Formats tags as `#a #b`, coloured.
pub fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}").tag())
        .collect::<Vec<_>>()
        .join(" ")
}
