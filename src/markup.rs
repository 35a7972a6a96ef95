//! # Console Markup
//!
//! Messages may carry inline color tags: `<c:Name>` switches the foreground
//! color and `</c>` restores the one that was active before. Tags nest through
//! a push/pop stack. Unknown color names never fail a message; the tag is
//! dropped and the current color stays in effect.

use crossterm::style::Color;

/// A run of text drawn in one color. `None` means the console default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: Option<Color>,
}

enum Tag<'a> {
    Open(&'a str),
    Close,
}

/// Split `markup` into colored segments. Empty segments are omitted.
pub fn parse(markup: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stack: Vec<Option<Color>> = Vec::new();
    let mut current: Option<Color> = None;
    let mut text = String::new();
    let mut rest = markup;

    while let Some(pos) = rest.find('<') {
        text.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match read_tag(candidate) {
            Some((tag, consumed)) => {
                flush(&mut segments, &mut text, current);
                match tag {
                    Tag::Open(name) => {
                        stack.push(current);
                        if let Some(color) = color_by_name(name) {
                            current = Some(color);
                        }
                    }
                    Tag::Close => {
                        current = stack.pop().unwrap_or(None);
                    }
                }
                rest = &candidate[consumed..];
            }
            None => {
                text.push('<');
                rest = &candidate[1..];
            }
        }
    }
    text.push_str(rest);
    flush(&mut segments, &mut text, current);
    segments
}

/// Text with all color tags removed.
pub fn strip(markup: &str) -> String {
    parse(markup).into_iter().map(|s| s.text).collect()
}

/// Center `header` for a console `width` columns wide, measuring only the
/// visible text. Tags are kept so the caller can still print it in color.
pub fn centered_header(header: &str, width: usize) -> String {
    let visible = strip(header).chars().count();
    let indent = (width / 2).saturating_sub(visible / 2);
    format!("{}{}", " ".repeat(indent), header)
}

/// Classic sixteen console color names, case-insensitive.
pub fn color_by_name(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "darkblue" => Color::DarkBlue,
        "darkgreen" => Color::DarkGreen,
        "darkcyan" => Color::DarkCyan,
        "darkred" => Color::DarkRed,
        "darkmagenta" => Color::DarkMagenta,
        "darkyellow" => Color::DarkYellow,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "cyan" => Color::Cyan,
        "red" => Color::Red,
        "magenta" => Color::Magenta,
        "yellow" => Color::Yellow,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

fn read_tag(s: &str) -> Option<(Tag<'_>, usize)> {
    if s.starts_with("</c>") {
        return Some((Tag::Close, 4));
    }
    let body = s.strip_prefix("<c:")?;
    let name_len = body
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)?;
    if name_len == 0 || !body[name_len..].starts_with('>') {
        return None;
    }
    Some((Tag::Open(&body[..name_len]), 3 + name_len + 1))
}

fn flush(segments: &mut Vec<Segment>, text: &mut String, color: Option<Color>) {
    if !text.is_empty() {
        segments.push(Segment {
            text: std::mem::take(text),
            color,
        });
    }
}
