use crate::models::Pattern;

/// Where the shell is: the dashboard or a launched pattern.
///
/// A route round-trips through a URL-style fragment, `""` for the dashboard and
/// `#<id>` for a pattern, so a session can be reopened where it was left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Dashboard,
    Pattern(String),
}

impl Route {
    /// Parses `#todo-list`, `todo-list`, or an empty fragment.
    pub fn from_fragment(fragment: &str) -> Self {
        let id = fragment.trim();
        let id = id.strip_prefix('#').unwrap_or(id).trim();
        if id.is_empty() {
            Route::Dashboard
        } else {
            Route::Pattern(id.to_string())
        }
    }

    pub fn fragment(&self) -> String {
        match self {
            Route::Dashboard => String::new(),
            Route::Pattern(id) => format!("#{id}"),
        }
    }

    pub fn for_pattern(pattern: &Pattern) -> Self {
        Route::Pattern(pattern.id.clone())
    }

    /// The pattern this route points at, if it exists in `patterns`.
    ///
    /// An unknown id is logged and yields `None`, which callers treat as the
    /// dashboard.
    pub fn resolve<'p>(&self, patterns: &'p [Pattern]) -> Option<&'p Pattern> {
        let Route::Pattern(id) = self else {
            return None;
        };
        let found = patterns.iter().find(|pattern| &pattern.id == id);
        if found.is_none() {
            log::warn!("Pattern with id \"{id}\" not found");
        }
        found
    }
}
