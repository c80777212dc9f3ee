pub mod pattern;

pub use pattern::{ImplementationDetails, Pattern, PatternKind, ReadmeFile, ReviewFile};
