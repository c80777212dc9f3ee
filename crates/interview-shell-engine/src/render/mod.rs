//! Markdown fragment renderer for instruction pages.
//!
//! Handles a small, non-standard markdown subset: `#`/`##`/`###` headings,
//! `**bold**` and `*italic*`, `-`/`*` bullet and `1.` numbered lists, fenced
//! and inline code, and blank-line paragraph breaks. It is a best-effort
//! formatter, not a parser: anything it does not recognize, including an
//! unterminated fence or backtick, passes through as literal text.
//!
//! ## Pipeline
//!
//! ```text
//! text ─► extract code ─► lists ─► markup ─► restore code ─► HTML fragment
//!        (protect.rs)   (lists.rs) (markup.rs) (protect.rs)
//! ```
//!
//! Code is lifted out behind placeholders before anything else runs, so markup
//! characters inside code are never interpreted. Fenced block contents get `<`
//! and `>` escaped on the way back; nothing else is sanitized, so raw HTML in
//! the input reaches the output unchanged.
//!
//! Rendering is pure: placeholder indices live in the [`ProtectedRegions`]
//! built by each call, so concurrent calls share nothing but compiled regexes.

pub mod lists;
pub mod markup;
pub mod protect;

pub use lists::{ListLine, ListState, render_lists};
pub use markup::apply_markup;
pub use protect::{ProtectedRegions, RegionKind, format_code_block, placeholder};

/// Renders `text` to an HTML fragment.
///
/// The fragment is meant to sit inside a `<p>` element: paragraph breaks are
/// emitted as `</p><p>`. Use [`render_document`] to get the wrapped form.
///
/// ```
/// use interview_shell_engine::render::render_markdown;
///
/// assert_eq!(
///     render_markdown("Call `run()` **now**"),
///     "Call <code>run()</code> <strong>now</strong>"
/// );
/// ```
pub fn render_markdown(text: &str) -> String {
    let (text, regions) = ProtectedRegions::extract(text);
    let text = render_lists(&text);
    let text = apply_markup(&text);
    regions.restore(&text)
}

/// Renders `text` and wraps it in the outer `<p>…</p>` pair.
pub fn render_document(text: &str) -> String {
    format!("<p>{}</p>", render_markdown(text))
}
