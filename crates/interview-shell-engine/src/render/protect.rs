use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Delimiter around placeholder tokens. A private-use code point, so no markdown
/// substitution can match it.
const MARK: char = '\u{E000}';

/// Starts an escape for a `MARK` or `ESCAPE` that was already in the input, so
/// every `MARK` seen between extract and restore belongs to a placeholder.
const ESCAPE: char = '\u{E001}';
const ESCAPED_MARK: &str = "\u{E001}0";
const ESCAPED_ESCAPE: &str = "\u{E001}1";

fn escape_delimiters(text: &str) -> Cow<'_, str> {
    if !text.contains([MARK, ESCAPE]) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            MARK => out.push_str(ESCAPED_MARK),
            ESCAPE => out.push_str(ESCAPED_ESCAPE),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape_delimiters`]. Escapes are two chars and never overlap,
/// so marks are unescaped before escapes.
fn unescape_delimiters(text: String) -> String {
    if !text.contains(ESCAPE) {
        return text;
    }
    text.replace(ESCAPED_MARK, &MARK.to_string())
        .replace(ESCAPED_ESCAPE, &ESCAPE.to_string())
}

/// Which kind of protected region a placeholder stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    CodeBlock,
    InlineCode,
}

impl RegionKind {
    fn tag(self) -> &'static str {
        match self {
            RegionKind::CodeBlock => "CODE_BLOCK",
            RegionKind::InlineCode => "INLINE_CODE",
        }
    }
}

/// Builds the placeholder token for the `index`-th region of `kind`.
pub fn placeholder(kind: RegionKind, index: usize) -> String {
    format!("{MARK}{}_{index}{MARK}", kind.tag())
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("Invalid fence regex"))
}

fn inline_code_regex() -> &'static Regex {
    static INLINE: OnceLock<Regex> = OnceLock::new();
    INLINE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("Invalid inline code regex"))
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new("\u{E000}(CODE_BLOCK|INLINE_CODE)_([0-9]+)\u{E000}")
            .expect("Invalid placeholder regex")
    })
}

fn open_fence_regex() -> &'static Regex {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    OPEN.get_or_init(|| Regex::new(r"^```(?:[A-Za-z0-9_]*\n)?").expect("Invalid open fence regex"))
}

/// Code regions lifted out of a document before any markup is interpreted.
///
/// Indices are local to one render call: `code_blocks[i]` is the text behind the
/// `i`-th code block placeholder, `inline_codes[i]` the already formatted
/// `<code>` element behind the `i`-th inline placeholder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProtectedRegions {
    code_blocks: Vec<String>,
    inline_codes: Vec<String>,
}

impl ProtectedRegions {
    /// Replaces fenced code blocks, then inline code spans, with placeholders.
    ///
    /// Fences go first so backticks inside a block never start an inline span.
    /// An unterminated fence or backtick simply produces no match. Delimiter
    /// characters already present in `text` are escaped in the returned text
    /// and regions; [`restore`](Self::restore) undoes that.
    pub fn extract(text: &str) -> (String, Self) {
        let mut regions = Self::default();

        let text = escape_delimiters(text);
        let text = fence_regex().replace_all(&text, |caps: &Captures<'_>| {
            let index = regions.code_blocks.len();
            regions.code_blocks.push(caps[0].to_string());
            placeholder(RegionKind::CodeBlock, index)
        });

        let text = inline_code_regex()
            .replace_all(&text, |caps: &Captures<'_>| {
                let index = regions.inline_codes.len();
                regions.inline_codes.push(format!("<code>{}</code>", &caps[1]));
                placeholder(RegionKind::InlineCode, index)
            })
            .into_owned();

        (text, regions)
    }

    pub fn code_blocks(&self) -> &[String] {
        &self.code_blocks
    }

    pub fn inline_codes(&self) -> &[String] {
        &self.inline_codes
    }

    /// Puts every region back: inline code first, then code blocks.
    ///
    /// Code blocks are restored last because an inline span may have captured a
    /// block placeholder; the block then lands inside the restored `<code>`.
    pub fn restore(&self, text: &str) -> String {
        let text = restore_placeholders(text, RegionKind::InlineCode, |index| {
            self.inline_codes.get(index).cloned()
        });
        let text = restore_placeholders(&text, RegionKind::CodeBlock, |index| {
            self.code_blocks
                .get(index)
                .map(|block| format_code_block(block))
        });
        unescape_delimiters(text)
    }
}

/// Swaps each placeholder of `kind` for whatever `lookup` returns for its index.
/// Placeholders of the other kind, or with no stored region, stay as they are.
fn restore_placeholders(
    text: &str,
    kind: RegionKind,
    lookup: impl Fn(usize) -> Option<String>,
) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &Captures<'_>| {
            if &caps[1] != kind.tag() {
                return caps[0].to_string();
            }
            caps[2]
                .parse::<usize>()
                .ok()
                .and_then(&lookup)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Turns a stored fenced block (fences included) into `<pre><code>`.
///
/// The opening fence loses an optional word-character language tag and its
/// newline; only `<` and `>` are escaped in what remains.
pub fn format_code_block(block: &str) -> String {
    let body = open_fence_regex().replace(block, "");
    let body = body.strip_suffix("```").unwrap_or(&body);
    format!("<pre><code>{}</code></pre>", escape_angle_brackets(body))
}

fn escape_angle_brackets(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}
