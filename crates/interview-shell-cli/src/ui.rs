use interview_shell_engine::{
    ImplementationDetails, Pattern, Session, ShellView, TabMetrics, layout_tabs,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::App;

/// Tab strip spacing in terminal cells.
const TAB_METRICS: TabMetrics = TabMetrics {
    list_padding: 2,
    dropdown_width: 12,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(header_line(app)), rows[0]);

    let help = match app.active() {
        Some((pattern, session)) => {
            draw_shell(f, rows[1], pattern, session);
            shell_help(session)
        }
        None => {
            draw_dashboard(f, rows[1], app);
            "q: Quit | ↑/k: Previous | ↓/j: Next | Enter: Launch"
        }
    };

    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

fn header_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Interview Shell",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some((pattern, _)) = app.active() {
        spans.push(Span::raw(format!(" / {}", pattern.name)));
    } else if !app.patterns().is_empty() {
        spans.push(Span::styled("  Ready", Style::default().fg(Color::Green)));
    }
    if app.skipped() > 0 {
        spans.push(Span::styled(
            format!("  ({} skipped, see log)", app.skipped()),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn shell_help(session: &Session) -> &'static str {
    match session.view() {
        ShellView::Instructions => "←/h →/l: Page | 1-9: Jump | Esc: Close | b: Dashboard | q: Quit",
        _ => "i: Instructions | Esc/b: Dashboard | q: Quit",
    }
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &mut App) {
    if app.patterns().is_empty() {
        let lines = vec![
            Line::from("Welcome to Interview Shell"),
            Line::from(""),
            Line::from("No interview patterns found. To add one:"),
            Line::from("  1. Create a directory in your patterns folder"),
            Line::from("  2. Add a pattern.toml describing it"),
            Line::from("  3. Add README.md files with the instructions"),
        ];
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let items: Vec<ListItem> = app
        .patterns()
        .iter()
        .map(|pattern| {
            ListItem::new(Line::from(vec![
                Span::raw(pattern.name.clone()),
                Span::styled(
                    format!("  {}", pattern.kind.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Patterns"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(list, columns[0], app.list_state_mut());

    let details = app.selected().map(pattern_card).unwrap_or_default();
    f.render_widget(
        Paragraph::new(details)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: false }),
        columns[1],
    );
}

fn pattern_card(pattern: &Pattern) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            pattern.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(pattern.description.clone()),
        Line::from(""),
        Line::from(format!("Version  {}", pattern.version_label())),
    ];
    if let Some(author) = &pattern.author {
        lines.push(Line::from(format!("Author   {author}")));
    }
    if let Some(time) = &pattern.estimated_time {
        lines.push(Line::from(format!("Time     {time}")));
    }
    if let Some(label) = pattern.instruction_label() {
        lines.push(Line::from(label));
    }
    if !pattern.tags.is_empty() {
        lines.push(Line::from(format!("Tags     {}", pattern.tags.join(", "))));
    }
    lines
}

fn draw_shell(f: &mut Frame, area: Rect, pattern: &Pattern, session: &Session) {
    match session.view() {
        ShellView::Instructions => draw_instructions(f, area, pattern, session),
        ShellView::ImplementationDetails => f.render_widget(
            panel(
                "Implementation Details",
                implementation_lines(pattern.implementation_details.as_ref()),
            ),
            area,
        ),
        ShellView::CodeReview => f.render_widget(panel("Code Review", review_lines(pattern)), area),
        ShellView::Component => {
            let line = match pattern.entry_path() {
                Some(path) => format!("Component entry: {}", path.display()),
                None => "This pattern has no component entry.".to_string(),
            };
            f.render_widget(panel(pattern.kind.label(), vec![Line::from(line)]), area);
        }
    }
}

fn panel<'a>(title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
}

fn draw_instructions(f: &mut Frame, area: Rect, pattern: &Pattern, session: &Session) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    f.render_widget(Paragraph::new(tab_line(pattern, session, rows[0].width)), rows[0]);

    let pager = session.pager();
    let title = format!("Instructions {}/{}", pager.current() + 1, pager.len());
    let lines = session
        .current_readme(pattern)
        .map(|readme| readme.content.lines().map(Line::from).collect())
        .unwrap_or_default();
    f.render_widget(panel(&title, lines), rows[1]);
}

fn tab_line(pattern: &Pattern, session: &Session, width: u16) -> Line<'static> {
    let current = session.pager().current();
    let labels: Vec<Span> = pattern
        .readmes
        .iter()
        .enumerate()
        .map(|(index, readme)| {
            let style = if index == current {
                Style::default().bg(Color::Yellow).fg(Color::Black)
            } else {
                Style::default()
            };
            Span::styled(format!(" {} ", readme.title), style)
        })
        .collect();

    let widths: Vec<usize> = labels.iter().map(Span::width).collect();
    let layout = layout_tabs(&widths, usize::from(width), TAB_METRICS);

    let mut spans: Vec<Span> = layout
        .visible
        .iter()
        .filter_map(|&index| labels.get(index).cloned())
        .collect();
    if layout.has_overflow() {
        let hidden_current = layout.overflow.contains(&current);
        let marker = format!(" ▾ +{} more", layout.overflow.len());
        spans.push(if hidden_current {
            Span::styled(marker, Style::default().fg(Color::Yellow))
        } else {
            Span::raw(marker)
        });
    }
    Line::from(spans)
}

fn implementation_lines(details: Option<&ImplementationDetails>) -> Vec<Line<'static>> {
    let Some(details) = details else {
        return vec![Line::from("No implementation details for this pattern.")];
    };

    let mut lines = Vec::new();
    if !details.steps.is_empty() {
        lines.push(Line::from(Span::styled(
            "Steps",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (number, step) in details.steps.iter().enumerate() {
            lines.push(Line::from(format!("  {}. {step}", number + 1)));
        }
        lines.push(Line::from(""));
    }
    if !details.tips.is_empty() {
        lines.push(Line::from(Span::styled(
            "Tips",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(details.tips.iter().map(|tip| Line::from(format!("  • {tip}"))));
        lines.push(Line::from(""));
    }
    if let Some(test_cases) = &details.test_cases {
        lines.push(Line::from(Span::styled(
            "Test cases",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(test_cases.lines().map(|line| Line::from(format!("  {line}"))));
    }
    lines
}

fn review_lines(pattern: &Pattern) -> Vec<Line<'static>> {
    if pattern.review_files.is_empty() {
        return vec![Line::from("No files listed for review.")];
    }
    pattern
        .review_files
        .iter()
        .map(|file| {
            Line::from(vec![
                Span::styled(file.path.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(format!("  {}", file.description)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use interview_shell_engine::{Discovery, PatternKind, ReadmeFile, Route};
    use ratatui::{Terminal, backend::TestBackend};
    use std::path::PathBuf;

    fn pattern(id: &str, kind: PatternKind, titles: &[&str]) -> Pattern {
        Pattern {
            id: id.to_string(),
            name: format!("{id} pattern"),
            description: "Practice makes perfect".to_string(),
            version: "2.0.0".to_string(),
            author: None,
            estimated_time: Some("45 min".to_string()),
            tags: vec!["react".to_string()],
            kind,
            readmes: titles
                .iter()
                .map(|title| ReadmeFile {
                    title: title.to_string(),
                    content: format!("# {title}\n\nbody of {title}"),
                })
                .collect(),
            implementation_details: None,
            review_files: Vec::new(),
            entry: None,
            root: PathBuf::from(id),
        }
    }

    fn render(app: &mut App, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 16)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn dashboard_lists_patterns_and_details() {
        let mut app = App::new(Discovery {
            patterns: vec![pattern("todo", PatternKind::CodingChallenge, &["Intro"])],
            skipped: Vec::new(),
        });

        let screen = render(&mut app, 100);

        assert!(screen.contains("Ready"));
        assert!(screen.contains("todo pattern"));
        assert!(screen.contains("Coding challenge"));
        assert!(screen.contains("Version  v2.0.0"));
        assert!(screen.contains("1 instruction"));
    }

    #[test]
    fn empty_dashboard_explains_how_to_add_patterns() {
        let mut app = App::new(Discovery::default());

        let screen = render(&mut app, 80);

        assert!(screen.contains("No interview patterns found"));
        assert!(!screen.contains("Ready"));
    }

    #[test]
    fn instructions_show_current_readme() {
        let mut app = App::new(Discovery {
            patterns: vec![pattern("todo", PatternKind::CodingChallenge, &["Intro", "Tasks"])],
            skipped: Vec::new(),
        });
        app.open_route(&Route::from_fragment("#todo"));
        app.handle_key(KeyCode::Right);

        let screen = render(&mut app, 80);

        assert!(screen.contains("Instructions 2/2"));
        assert!(screen.contains("body of Tasks"));
    }

    #[test]
    fn narrow_tab_strip_overflows() {
        let titles = ["Introduction", "Requirements", "Stretch goals", "Hints"];
        let mut app = App::new(Discovery {
            patterns: vec![pattern("todo", PatternKind::CodingChallenge, &titles)],
            skipped: Vec::new(),
        });
        app.open_route(&Route::from_fragment("#todo"));

        let screen = render(&mut app, 40);

        assert!(screen.contains("more"));
    }
}
