/// Fixed widths around the instruction tab strip, in the caller's units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabMetrics {
    /// Padding of the tab list itself.
    pub list_padding: usize,
    /// Space reserved for the overflow dropdown trigger.
    pub dropdown_width: usize,
}

impl Default for TabMetrics {
    fn default() -> Self {
        Self {
            list_padding: 6,
            dropdown_width: 40,
        }
    }
}

/// Which tabs are shown inline and which go into the overflow menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabLayout {
    pub visible: Vec<usize>,
    pub overflow: Vec<usize>,
}

impl TabLayout {
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

/// Splits tabs of the given `widths` between the strip and the overflow menu.
///
/// Everything is visible when there is at most one tab or when all tabs plus
/// the list padding fit `container_width`. Otherwise tabs are taken in natural
/// order while they fit beside the dropdown trigger; a tab that does not fit
/// overflows, but a narrower tab after it may still be shown.
pub fn layout_tabs(widths: &[usize], container_width: usize, metrics: TabMetrics) -> TabLayout {
    let all = || (0..widths.len()).collect::<Vec<_>>();

    if widths.len() <= 1 {
        return TabLayout {
            visible: all(),
            overflow: Vec::new(),
        };
    }

    let total = metrics.list_padding + widths.iter().sum::<usize>();
    if total <= container_width {
        return TabLayout {
            visible: all(),
            overflow: Vec::new(),
        };
    }

    let available = container_width.saturating_sub(metrics.dropdown_width);
    let mut layout = TabLayout::default();
    let mut used = metrics.list_padding;

    for (index, &width) in widths.iter().enumerate() {
        if used + width <= available {
            layout.visible.push(index);
            used += width;
        } else {
            layout.overflow.push(index);
        }
    }

    layout
}
