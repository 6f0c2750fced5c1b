use crossterm::style::{StyledContent, Stylize};

use crate::util::ANSI_ESCAPE;

/// Named styling functions used to render a prompt.
///
/// Every method maps plain text to styled text. The provided methods leave
/// text untouched, which is what [`PlainStyle`] uses.
pub trait Style {
    fn muted(&self, text: &str) -> String {
        text.to_string()
    }

    fn danger(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn primary(&self, text: &str) -> String {
        text.to_string()
    }

    fn disabled(&self, text: &str) -> String {
        text.to_string()
    }

    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn strong(&self, text: &str) -> String {
        text.to_string()
    }

    /// Emphasis, used for the focus pointer.
    fn em(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Returns `true` if `text` already carries terminal styling.
pub fn has_color(text: &str) -> bool {
    ANSI_ESCAPE.is_match(text)
}

/// Colored style for ANSI terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStyle;

/// Style that prints everything as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl Style for PlainStyle {}

// An empty string stays empty so that callers can keep filtering on it.
fn paint<'a>(text: &'a str, f: impl FnOnce(&'a str) -> StyledContent<&'a str>) -> String {
    if text.is_empty() {
        String::new()
    } else {
        f(text).to_string()
    }
}

impl Style for DefaultStyle {
    fn muted(&self, text: &str) -> String {
        paint(text, |t| t.dark_grey())
    }

    fn danger(&self, text: &str) -> String {
        paint(text, |t| t.red())
    }

    fn heading(&self, text: &str) -> String {
        paint(text, |t| t.cyan().underlined())
    }

    fn primary(&self, text: &str) -> String {
        paint(text, |t| t.cyan())
    }

    fn disabled(&self, text: &str) -> String {
        paint(text, |t| t.dark_grey().dim())
    }

    fn success(&self, text: &str) -> String {
        paint(text, |t| t.green())
    }

    fn strong(&self, text: &str) -> String {
        paint(text, |t| t.bold())
    }

    fn em(&self, text: &str) -> String {
        paint(text, |t| t.cyan().bold())
    }
}
