use std::sync::OnceLock;

use regex::Regex;

/// Paragraph separator in the input and its replacement.
const BLANK_LINE: &str = "\n\n";
const PARAGRAPH_BREAK: &str = "</p><p>";

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

/// Substitution rules in application order.
///
/// Headings match at line starts; `# ` never matches a `##` line because the
/// second character must be a space. Bold runs before italic so `**` pairs are
/// consumed first. Both emphasis rules are lazy and never cross a newline.
/// CRLF mode keeps a `\r` out of every capture.
fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"(?mR)^# (.*)$", "<h1>${1}</h1>"),
            (r"(?mR)^## (.*)$", "<h2>${1}</h2>"),
            (r"(?mR)^### (.*)$", "<h3>${1}</h3>"),
            (r"(?R)\*\*(.*?)\*\*", "<strong>${1}</strong>"),
            (r"(?R)\*(.*?)\*", "<em>${1}</em>"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("Invalid markup regex"),
            replacement,
        })
        .collect()
    })
}

/// Applies headings, emphasis and paragraph breaks across the whole text.
pub fn apply_markup(text: &str) -> String {
    let text = rules().iter().fold(text.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    });
    text.replace(BLANK_LINE, PARAGRAPH_BREAK)
}
