/// Position within a pattern's instruction pages.
///
/// Paging clamps at both ends instead of wrapping; `go_to` ignores indices
/// outside the page range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstructionPager {
    len: usize,
    current: usize,
}

impl InstructionPager {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.len {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len
    }
}
