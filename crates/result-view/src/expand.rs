use std::collections::HashSet;

/// Which result cards are expanded, keyed by position in the result list
#[derive(Debug, Default, Clone)]
pub struct ExpandState {
    expanded: HashSet<usize>,
}

impl ExpandState {
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Returns the new state of the card
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    /// Collapse everything. Called whenever a new result set arrives.
    pub fn reset(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}
