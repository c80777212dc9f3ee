use crate::models::{Pattern, PatternKind, ReadmeFile};

use super::pager::InstructionPager;

/// The screen a launched pattern is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    Instructions,
    ImplementationDetails,
    CodeReview,
    Component,
}

impl ShellView {
    /// What a pattern shows when instructions are not open.
    pub fn base(pattern: &Pattern) -> Self {
        match pattern.kind {
            PatternKind::CodingChallenge => ShellView::ImplementationDetails,
            PatternKind::CodeReview => ShellView::CodeReview,
            PatternKind::Component => ShellView::Component,
        }
    }

    /// The first screen after launch. Coding challenges open on their
    /// instructions when they have any.
    pub fn launch(pattern: &Pattern) -> Self {
        if pattern.kind == PatternKind::CodingChallenge && pattern.has_instructions() {
            ShellView::Instructions
        } else {
            Self::base(pattern)
        }
    }
}

/// State of one launched pattern.
///
/// The session does not own its pattern; the caller passes it back in so the
/// pattern list can stay in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    view: ShellView,
    pager: InstructionPager,
}

impl Session {
    pub fn launch(pattern: &Pattern) -> Self {
        Self {
            view: ShellView::launch(pattern),
            pager: InstructionPager::new(pattern.instruction_count()),
        }
    }

    pub fn view(&self) -> ShellView {
        self.view
    }

    pub fn pager(&self) -> &InstructionPager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut InstructionPager {
        &mut self.pager
    }

    /// Opens the instructions; a pattern without any stays where it is.
    pub fn open_instructions(&mut self) -> bool {
        if self.pager.is_empty() {
            return false;
        }
        self.view = ShellView::Instructions;
        true
    }

    /// Leaves the instructions for the pattern's base view.
    pub fn close_instructions(&mut self, pattern: &Pattern) {
        if self.view == ShellView::Instructions {
            self.view = ShellView::base(pattern);
        }
    }

    pub fn current_readme<'p>(&self, pattern: &'p Pattern) -> Option<&'p ReadmeFile> {
        pattern.readmes.get(self.pager.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{pattern_with_readmes, sample_pattern};

    #[test]
    fn coding_challenge_opens_on_instructions() {
        let pattern = pattern_with_readmes("c", PatternKind::CodingChallenge, &["One", "Two"]);
        let session = Session::launch(&pattern);

        assert_eq!(session.view(), ShellView::Instructions);
        assert_eq!(session.current_readme(&pattern).unwrap().title, "One");
    }

    #[test]
    fn coding_challenge_without_readmes_opens_on_details() {
        let pattern = pattern_with_readmes("c", PatternKind::CodingChallenge, &[]);
        let mut session = Session::launch(&pattern);

        assert_eq!(session.view(), ShellView::ImplementationDetails);
        assert!(!session.open_instructions());
        assert_eq!(session.view(), ShellView::ImplementationDetails);
        assert!(session.current_readme(&pattern).is_none());
    }

    #[test]
    fn closing_instructions_shows_details_and_can_reopen() {
        let pattern = pattern_with_readmes("c", PatternKind::CodingChallenge, &["One", "Two"]);
        let mut session = Session::launch(&pattern);
        session.pager_mut().next();

        session.close_instructions(&pattern);
        assert_eq!(session.view(), ShellView::ImplementationDetails);

        assert!(session.open_instructions());
        assert_eq!(session.view(), ShellView::Instructions);
        assert_eq!(session.current_readme(&pattern).unwrap().title, "Two");
    }

    #[test]
    fn other_kinds_open_on_their_base_view() {
        let review = pattern_with_readmes("r", PatternKind::CodeReview, &["Brief"]);
        assert_eq!(Session::launch(&review).view(), ShellView::CodeReview);

        let component = sample_pattern("w");
        let session = Session::launch(&component);
        assert_eq!(session.view(), ShellView::Component);
    }

    #[test]
    fn review_instructions_close_back_to_review() {
        let review = pattern_with_readmes("r", PatternKind::CodeReview, &["Brief"]);
        let mut session = Session::launch(&review);

        assert!(session.open_instructions());
        session.close_instructions(&review);
        assert_eq!(session.view(), ShellView::CodeReview);
    }
}
