use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]").expect("ANSI pattern is valid"));

pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Number of columns `text` takes when printed, ignoring escape sequences.
pub fn display_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// Number of terminal rows `text` occupies on a terminal `columns` wide.
///
/// Each line is laid out cell by cell: a character that does not fit in
/// what is left of a row starts the next one, so a wide character never
/// straddles the edge. A line that exactly fills a row takes one row.
/// A `columns` of zero disables wrapping.
pub fn rows(text: &str, columns: usize) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.split('\n').map(|line| line_rows(line, columns)).sum()
}

fn line_rows(line: &str, columns: usize) -> usize {
    if columns == 0 {
        return 1;
    }
    let mut rows = 1;
    let mut col = 0;
    for c in strip_ansi(line).chars() {
        let width = c.width().unwrap_or(0);
        if width == 0 {
            continue;
        }
        if col > 0 && col + width > columns {
            rows += 1;
            col = 0;
        }
        col += width;
    }
    rows
}

/// Joins the non-empty parts with `sep`.
pub fn join_nonempty<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
