//! Static HTML pages for the dashboard and for each launched pattern.
//!
//! Pattern metadata is escaped; instruction bodies go through
//! [`render_document`] and are not sanitized.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};
use url::Url;

use crate::models::{ImplementationDetails, Pattern, PatternKind};
use crate::render::render_document;

pub const DASHBOARD_FILE: &str = "index.html";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f4f5;color:#18181b}\
header{display:flex;align-items:center;justify-content:space-between;gap:1rem;padding:1rem 2rem;border-bottom:1px solid #e4e4e7;background:#fff}\
main{max-width:72rem;margin:0 auto;padding:2rem}\
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(20rem,1fr));gap:1.5rem}\
.card{background:#fff;border:1px solid #e4e4e7;border-radius:.5rem;padding:1.5rem}\
.tags{display:flex;flex-wrap:wrap;gap:.5rem;list-style:none;padding:0}\
.tags li{background:#e4e4e7;border-radius:.25rem;padding:0 .5rem}\
.metadata{display:grid;grid-template-columns:auto 1fr;gap:.25rem 1rem}\
.ready{color:#16a34a}\
.tabs{display:flex;gap:.5rem;flex-wrap:wrap}\
.page{background:#fff;border:1px solid #e4e4e7;border-radius:.5rem;padding:1rem 2rem;margin:1rem 0}\
.navigation{display:flex;justify-content:space-between}\
pre{background:#27272a;color:#fafafa;padding:1rem;overflow:auto}\
iframe{width:100%;height:80vh;border:1px solid #e4e4e7}";

/// File name a pattern's page is written to, relative to the dashboard.
pub fn page_file_name(pattern: &Pattern) -> String {
    format!("{}.html", pattern.id)
}

fn text(s: &str) -> Cow<'_, str> {
    encode_text(s)
}

fn attr(s: &str) -> Cow<'_, str> {
    encode_double_quoted_attribute(s)
}

fn page(title: &str, header: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header>{header}</header>\n<main id=\"main-content\">\n{body}</main>\n</body>\n</html>\n",
        text(title)
    )
}

/// The landing page: one card per pattern, or help text when there are none.
pub fn dashboard_page(patterns: &[Pattern]) -> String {
    let mut header = format!("<a class=\"home\" href=\"{DASHBOARD_FILE}\">Interview Shell</a>");
    if !patterns.is_empty() {
        header.push_str(
            "<span class=\"ready\" title=\"Interview challenges are loaded and ready to launch\">Ready</span>",
        );
    }

    let mut body = String::from(
        "<section class=\"welcome\">\n<h1>Welcome to your interview session!</h1>\n\
         <p>Once you're ready, pick a challenge below to begin your interview.</p>\n</section>\n",
    );

    if patterns.is_empty() {
        body.push_str(
            "<section class=\"help\">\n<h2>No challenges yet</h2>\n<ol>\n\
             <li><strong>Receive interview materials:</strong> your interviewer provides a pattern bundle.</li>\n\
             <li><strong>Extract to the patterns directory:</strong> each bundle is a directory holding a <code>pattern.toml</code>.</li>\n\
             <li><strong>Reload:</strong> the challenge appears here as a card.</li>\n\
             </ol>\n</section>\n",
        );
    } else {
        body.push_str("<section id=\"interview-patterns\">\n<h2>Challenges</h2>\n<div class=\"cards\">\n");
        for pattern in patterns {
            body.push_str(&card(pattern));
        }
        body.push_str("</div>\n</section>\n");
    }

    page("Interview Session", &header, &body)
}

fn card(pattern: &Pattern) -> String {
    let mut out = format!(
        "<article class=\"card\">\n<h3>{}</h3>\n<p class=\"description\">{}</p>\n",
        text(&pattern.name),
        text(&pattern.description)
    );

    if !pattern.tags.is_empty() {
        out.push_str("<ul class=\"tags\">");
        for tag in &pattern.tags {
            let _ = write!(out, "<li>{}</li>", text(tag));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("<dl class=\"metadata\">\n");
    if let Some(author) = &pattern.author {
        let _ = writeln!(out, "<dt>Author</dt><dd>{}</dd>", text(author));
    }
    if let Some(time) = &pattern.estimated_time {
        let _ = writeln!(out, "<dt>Time</dt><dd>{}</dd>", text(time));
    }
    let _ = writeln!(out, "<dt>Version</dt><dd>{}</dd>", text(&pattern.version_label()));
    let _ = writeln!(
        out,
        "<dt>Instructions</dt><dd>{}</dd>",
        pattern.instruction_label().unwrap_or_default()
    );
    out.push_str("</dl>\n");

    let _ = write!(
        out,
        "<a class=\"launch\" href=\"{}\">Launch challenge</a>\n</article>\n",
        attr(&page_file_name(pattern))
    );
    out
}

/// The full-screen shell for one pattern.
pub fn pattern_page(pattern: &Pattern) -> String {
    let header = format!(
        "<a class=\"back\" href=\"{DASHBOARD_FILE}\">&larr; Back to dashboard</a>\
         <h1>{}</h1><span class=\"kind\">{}</span>",
        text(&pattern.name),
        pattern.kind.label()
    );

    let mut body = String::new();
    match pattern.kind {
        PatternKind::CodingChallenge => {
            body.push_str(&instructions(pattern));
            body.push_str(&implementation_details(
                pattern.implementation_details.as_ref(),
            ));
        }
        PatternKind::CodeReview => {
            body.push_str(&code_review(pattern));
            body.push_str(&instructions(pattern));
        }
        PatternKind::Component => {
            body.push_str(&component(pattern));
            body.push_str(&instructions(pattern));
        }
    }

    page(&pattern.name, &header, &body)
}

/// Tabbed instruction pages, or nothing for a pattern without readmes.
fn instructions(pattern: &Pattern) -> String {
    if !pattern.has_instructions() {
        return String::new();
    }

    let mut out = String::from("<section class=\"instructions\" id=\"instructions\">\n<nav class=\"tabs\">");
    for (index, readme) in pattern.readmes.iter().enumerate() {
        let _ = write!(
            out,
            "<a href=\"#page-{}\">{}</a>",
            index + 1,
            text(&readme.title)
        );
    }
    out.push_str("</nav>\n");

    let last = pattern.readmes.len() - 1;
    for (index, readme) in pattern.readmes.iter().enumerate() {
        let _ = write!(
            out,
            "<article class=\"page\" id=\"page-{}\">\n<h2 class=\"page-title\">{}</h2>\n\
             <div class=\"markdown-content\">{}</div>\n<footer class=\"navigation\">",
            index + 1,
            text(&readme.title),
            render_document(&readme.content)
        );
        if index > 0 {
            let _ = write!(out, "<a class=\"prev\" href=\"#page-{index}\">Previous</a>");
        }
        if index < last {
            let _ = write!(out, "<a class=\"next\" href=\"#page-{}\">Next</a>", index + 2);
        }
        out.push_str("</footer>\n</article>\n");
    }

    out.push_str("</section>\n");
    out
}

fn implementation_details(details: Option<&ImplementationDetails>) -> String {
    let mut out = String::from(
        "<section class=\"implementation-details\">\n<h2>Implementation Details</h2>\n\
         <div class=\"emphasis-banner\"><h3>Interview Focus</h3><p><strong>Quality over Speed:</strong> \
         demonstrate your problem-solving approach, code organization, and thoughtful use of tools. \
         It's better to implement fewer features well than to rush through everything.</p></div>\n",
    );

    let Some(details) = details else {
        out.push_str("</section>\n");
        return out;
    };

    if !details.steps.is_empty() {
        out.push_str("<h3>Quick Start</h3>\n<ol>\n");
        for step in &details.steps {
            let _ = writeln!(out, "<li>{}</li>", text(step));
        }
        out.push_str("</ol>\n");
    }
    if !details.tips.is_empty() {
        out.push_str("<h3>Implementation Tips</h3>\n<ul>\n");
        for tip in &details.tips {
            let _ = writeln!(out, "<li>{}</li>", text(tip));
        }
        out.push_str("</ul>\n");
    }
    if let Some(cases) = &details.test_cases {
        let _ = writeln!(
            out,
            "<h3>Test Cases</h3>\n<pre class=\"test-cases\"><code>{}</code></pre>",
            text(cases)
        );
    }

    out.push_str("</section>\n");
    out
}

const REVIEW_FOCUS: &[(&str, &str)] = &[
    ("Bugs &amp; Errors", "Look for syntax errors, logic flaws, and runtime issues"),
    ("Security Issues", "Check for exposed data, input validation, and vulnerabilities"),
    ("Performance", "Identify unnecessary calls, memory leaks, and optimization opportunities"),
    ("UX &amp; Accessibility", "Consider loading states, error handling, and user experience"),
];

const REVIEW_TIPS: &[(&str, &str)] = &[
    ("Think out loud", "Explain your reasoning as you review"),
    ("Ask questions", "Clarify anything that seems unclear"),
    ("Be systematic", "Go through files methodically"),
    ("Prioritize issues", "Distinguish critical bugs from nice-to-have improvements"),
    ("Suggest solutions", "Don't just identify problems, propose fixes"),
];

fn code_review(pattern: &Pattern) -> String {
    let mut out = format!(
        "<section class=\"code-review\">\n<h2>Live Code Review Exercise</h2>\n\
         <p class=\"exercise-subtitle\">{}</p>\n\
         <div class=\"notice\"><h3>This is a Live Interview Exercise</h3><p><strong>Share your screen</strong> \
         with the interviewer and open the files below in your preferred IDE. Walk through the code \
         systematically and discuss your findings out loud.</p></div>\n",
        text(&pattern.description)
    );

    if !pattern.review_files.is_empty() {
        out.push_str("<h3>Files to Review</h3>\n<ul class=\"file-tree\">\n");
        for file in &pattern.review_files {
            let _ = writeln!(
                out,
                "<li><code>{}</code> <span class=\"file-description\">{}</span></li>",
                text(&file.path),
                text(&file.description)
            );
        }
        out.push_str("</ul>\n");
    }

    out.push_str("<h3>Review Focus Areas</h3>\n<div class=\"focus-grid\">\n");
    for (title, hint) in REVIEW_FOCUS {
        let _ = writeln!(out, "<div class=\"focus-item\"><h4>{title}</h4><p>{hint}</p></div>");
    }
    out.push_str("</div>\n<h3>Interview Tips</h3>\n<ul>\n");
    for (tip, detail) in REVIEW_TIPS {
        let _ = writeln!(out, "<li><strong>{tip}</strong> - {}</li>", text(detail));
    }
    out.push_str("</ul>\n</section>\n");
    out
}

/// `file://` URL of a component entry, valid wherever the page is saved.
fn entry_url(entry: &Path) -> Option<Url> {
    let absolute = std::path::absolute(entry).ok()?;
    Url::from_file_path(absolute).ok()
}

fn component(pattern: &Pattern) -> String {
    let Some(entry) = pattern.entry_path() else {
        return "<section class=\"component\">\n<p>This pattern has no component entry.</p>\n</section>\n"
            .to_string();
    };
    match entry_url(&entry) {
        Some(url) => format!(
            "<section class=\"component\">\n<iframe src=\"{}\" title=\"{}\"></iframe>\n</section>\n",
            attr(url.as_str()),
            attr(&pattern.name)
        ),
        None => {
            log::warn!("Cannot link component entry {}", entry.display());
            format!(
                "<section class=\"component\">\n<p>Component entry <code>{}</code> cannot be opened.</p>\n</section>\n",
                text(&entry.to_string_lossy())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReadmeFile, ReviewFile};
    use crate::tests::{pattern_with_readmes, sample_pattern};
    use relative_path::RelativePathBuf;
    use std::path::PathBuf;

    #[test]
    fn dashboard_without_patterns_shows_help() {
        let html = dashboard_page(&[]);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No challenges yet"));
        assert!(!html.contains("class=\"ready\""));
        assert!(!html.contains("interview-patterns"));
    }

    #[test]
    fn dashboard_lists_cards() {
        let mut todo = pattern_with_readmes("todo", PatternKind::CodingChallenge, &["A", "B"]);
        todo.name = "Todo <List>".to_string();
        todo.description = "Build & test".to_string();
        todo.tags = vec!["react".to_string(), "<state>".to_string()];
        todo.author = Some("Team".to_string());
        todo.estimated_time = Some("45 min".to_string());
        let widget = sample_pattern("widget");

        let html = dashboard_page(&[todo, widget]);

        assert!(html.contains("class=\"ready\""));
        assert!(html.contains("<h3>Todo &lt;List&gt;</h3>"));
        assert!(html.contains("Build &amp; test"));
        assert!(html.contains("<li>&lt;state&gt;</li>"));
        assert!(html.contains("<dt>Author</dt><dd>Team</dd>"));
        assert!(html.contains("<dt>Time</dt><dd>45 min</dd>"));
        assert!(html.contains("<dt>Version</dt><dd>v1.0.0</dd>"));
        assert!(html.contains("<dd>2 instructions</dd>"));
        assert!(html.contains("href=\"todo.html\""));
        assert!(html.contains("href=\"widget.html\""));
        assert_eq!(html.matches("Launch challenge").count(), 2);
    }

    #[test]
    fn coding_challenge_page_renders_instructions_and_details() {
        let mut pattern = pattern_with_readmes("c", PatternKind::CodingChallenge, &["One", "Two"]);
        pattern.readmes[1].content = "Use `a < b` and **care**".to_string();
        pattern.implementation_details = Some(ImplementationDetails {
            steps: vec!["Install".to_string()],
            tips: vec!["Keep <it> small".to_string()],
            test_cases: Some("expect(a < b)".to_string()),
        });

        let html = pattern_page(&pattern);

        assert!(html.contains("href=\"index.html\""));
        assert!(html.contains("<a href=\"#page-1\">One</a><a href=\"#page-2\">Two</a>"));
        assert!(html.contains("<div class=\"markdown-content\"><p><h1>One</h1></p></div>"));
        assert!(html.contains("<p>Use <code>a < b</code> and <strong>care</strong></p>"));
        assert!(html.contains("<a class=\"next\" href=\"#page-2\">Next</a>"));
        assert!(html.contains("<a class=\"prev\" href=\"#page-1\">Previous</a>"));
        assert_eq!(html.matches("class=\"prev\"").count(), 1);
        assert_eq!(html.matches("class=\"next\"").count(), 1);
        assert!(html.contains("<li>Install</li>"));
        assert!(html.contains("<li>Keep &lt;it&gt; small</li>"));
        assert!(html.contains("<code>expect(a &lt; b)</code>"));
    }

    #[test]
    fn challenge_without_details_still_has_section() {
        let pattern = pattern_with_readmes("c", PatternKind::CodingChallenge, &[]);

        let html = pattern_page(&pattern);

        assert!(html.contains("Implementation Details"));
        assert!(!html.contains("id=\"instructions\""));
        assert!(!html.contains("Quick Start"));
    }

    #[test]
    fn code_review_page_lists_files() {
        let mut pattern = pattern_with_readmes("r", PatternKind::CodeReview, &[]);
        pattern.description = "Review the search app".to_string();
        pattern.review_files = vec![ReviewFile {
            path: "src/App.jsx".to_string(),
            description: "Main application component".to_string(),
        }];

        let html = pattern_page(&pattern);

        assert!(html.contains("Live Code Review Exercise"));
        assert!(html.contains("Review the search app"));
        assert!(html.contains("<code>src/App.jsx</code>"));
        assert!(html.contains("<h4>Bugs &amp; Errors</h4>"));
        assert!(html.contains("<strong>Think out loud</strong>"));
    }

    #[test]
    fn component_page_embeds_entry() {
        let mut pattern = sample_pattern("widget");
        pattern.root = PathBuf::from("/bundles/widget");
        pattern.entry = Some(RelativePathBuf::from("index.html"));
        pattern.readmes.push(ReadmeFile {
            title: "Notes".to_string(),
            content: "- one".to_string(),
        });

        let html = pattern_page(&pattern);

        assert!(html.contains("<iframe src=\"file:///"));
        assert!(html.contains("/bundles/widget/index.html\""));
        assert!(html.contains("<p><ul>\n<li>one</li>\n</ul></p>"));
    }

    #[test]
    fn component_entry_url_is_absolute_and_encoded() {
        let mut pattern = sample_pattern("widget");
        pattern.root = PathBuf::from("bundles/my widget");
        pattern.entry = Some(RelativePathBuf::from("app/index.html"));

        let html = pattern_page(&pattern);

        let src = html
            .split("<iframe src=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let url = Url::parse(src).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(src.ends_with("/bundles/my%20widget/app/index.html"));
        assert_eq!(
            url.to_file_path().unwrap(),
            std::env::current_dir()
                .unwrap()
                .join("bundles/my widget/app/index.html")
        );
    }

    #[test]
    fn component_without_entry_says_so() {
        let html = pattern_page(&sample_pattern("widget"));
        assert!(html.contains("no component entry"));
    }

    #[test]
    fn page_file_name_uses_id() {
        assert_eq!(page_file_name(&sample_pattern("rate-limiter")), "rate-limiter.html");
    }
}
