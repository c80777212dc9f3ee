use std::sync::OnceLock;

use regex::Regex;

/// Which list run the line scanner is currently inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    None,
    Bullet,
    Numbered,
}

impl ListState {
    fn open_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Bullet => Some("<ul>"),
            ListState::Numbered => Some("<ol>"),
        }
    }

    fn close_tag(self) -> Option<&'static str> {
        match self {
            ListState::None => None,
            ListState::Bullet => Some("</ul>"),
            ListState::Numbered => Some("</ol>"),
        }
    }
}

/// A single line's list role, with the item text borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLine<'a> {
    Bullet(&'a str),
    Numbered(&'a str),
    Other,
}

impl<'a> ListLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = bullet_regex().captures(line)
            && let Some(item) = caps.get(1)
        {
            return ListLine::Bullet(item.as_str());
        }
        if let Some(caps) = numbered_regex().captures(line)
            && let Some(item) = caps.get(2)
        {
            return ListLine::Numbered(item.as_str());
        }
        ListLine::Other
    }

    /// The run this line belongs to and its item text, if it is an item.
    fn state(self) -> (ListState, Option<&'a str>) {
        match self {
            ListLine::Bullet(item) => (ListState::Bullet, Some(item)),
            ListLine::Numbered(item) => (ListState::Numbered, Some(item)),
            ListLine::Other => (ListState::None, None),
        }
    }
}

fn bullet_regex() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^[*-] (.+)$").expect("Invalid bullet regex"))
}

fn numbered_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^([0-9]+)\. (.+)$").expect("Invalid numbered regex"))
}

/// Wraps consecutive bullet or numbered lines in `<ul>` / `<ol>` runs.
///
/// A change of run kind closes the open list before the next one opens, and
/// any non-item line closes it too. Non-item lines pass through unchanged.
/// Every tag and item is emitted on its own line.
pub fn render_lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut state = ListState::None;

    for line in text.split('\n') {
        let (next, item) = ListLine::classify(line).state();

        if next != state {
            out.extend(state.close_tag().map(str::to_string));
            out.extend(next.open_tag().map(str::to_string));
            state = next;
        }

        match item {
            Some(item) => out.push(format!("<li>{item}</li>")),
            None => out.push(line.to_string()),
        }
    }

    out.extend(state.close_tag().map(str::to_string));
    out.join("\n")
}
