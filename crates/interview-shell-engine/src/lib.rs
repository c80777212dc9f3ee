pub mod html;
pub mod io;
pub mod models;
pub mod render;
pub mod shell;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{Discovery, PatternError, SkippedBundle, discover_patterns, load_pattern};
pub use models::*;
pub use render::{render_document, render_markdown};
pub use shell::{InstructionPager, Route, Session, ShellView, TabLayout, TabMetrics, layout_tabs};
