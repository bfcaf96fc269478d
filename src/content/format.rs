//! Lightweight markup to HTML.
//!
//! Authors write posts with a tiny vocabulary: `- ` list items, `> ` quotes,
//! `**bold**`, `*italic*` and `` `code` ``. Lines are processed one at a
//! time with a single piece of state (whether a `<ul>` is open), joined with
//! `<br>`, and inline markers are substituted once over the joined string.
//!
//! [`format_content`] performs no escaping and is only meant for text written
//! by the site admin. Visitor text goes through [`format_untrusted`].
//!
//! Formatting is not idempotent: running it over its own output is not a
//! normalisation and will generally change the HTML.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::html_escape;

const LINE_BREAK: &str = "<br>";

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());

/// One rendered piece of output before joining.
enum Piece<'a> {
    /// Ordinary text line; consecutive text lines get a `<br>` between them.
    Text(Cow<'a, str>),
    /// Block markup (list or quote tags); never adjacent to a `<br>`.
    Block(String),
}

/// Render admin-authored text to HTML without escaping.
pub fn format_content(source: &str) -> String {
    render(source, |s| Cow::Borrowed(s))
}

/// Render visitor-supplied text to HTML, escaping markup first.
///
/// Structure markers are detected on the raw line so `> ` quotes still work
/// even though `>` is escaped inside the text itself.
pub fn format_untrusted(source: &str) -> String {
    render(source, html_escape)
}

fn render<'a>(source: &'a str, text: impl Fn(&'a str) -> Cow<'a, str>) -> String {
    let mut pieces: Vec<Piece<'a>> = Vec::new();
    let mut in_list = false;

    for line in source.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with("- ") {
            if !in_list {
                pieces.push(Piece::Block("<ul>".to_string()));
                in_list = true;
            }
            let item = strip_marker(line, "- ");
            pieces.push(Piece::Block(format!("<li>{}</li>", text(item))));
            continue;
        }

        if in_list {
            pieces.push(Piece::Block("</ul>".to_string()));
            in_list = false;
        }

        if trimmed.starts_with("> ") {
            let quote = strip_marker(line, "> ");
            pieces.push(Piece::Block(format!(
                "<blockquote>{}</blockquote>",
                text(quote)
            )));
        } else {
            pieces.push(Piece::Text(text(line)));
        }
    }

    if in_list {
        pieces.push(Piece::Block("</ul>".to_string()));
    }

    apply_inline(&join(&pieces))
}

/// Drop the marker (and any indentation before it) from a structural line.
fn strip_marker<'a>(line: &'a str, marker: &str) -> &'a str {
    let start = line.trim_start();
    start.strip_prefix(marker).unwrap_or(start)
}

fn join(pieces: &[Piece<'_>]) -> String {
    let mut out = String::new();
    let mut previous_was_text = false;

    for piece in pieces {
        match piece {
            Piece::Text(s) => {
                if previous_was_text {
                    out.push_str(LINE_BREAK);
                }
                out.push_str(s);
                previous_was_text = true;
            }
            Piece::Block(s) => {
                out.push_str(s);
                previous_was_text = false;
            }
        }
    }

    out
}

/// Bold must run before italic: both use `*`, and `**x**` must never be
/// partially consumed by the single-asterisk rule.
fn apply_inline(html: &str) -> String {
    let html = BOLD.replace_all(html, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    CODE.replace_all(&html, "<code>${1}</code>").into_owned()
}
