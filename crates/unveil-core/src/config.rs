/// Tunables for the reveal engine and catalogue search. The defaults give the
/// standard behaviour: revealed entities are selected and the last one
/// becomes active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnveilConfig {
    /// Select entities as they are revealed.
    pub select_revealed: bool,
    /// Point the active object (or active bone) at the last revealed entity.
    pub update_active: bool,
    /// Maximum number of catalogue search results. `None` = unlimited.
    pub search_limit: Option<usize>,
}

impl Default for UnveilConfig {
    fn default() -> Self {
        Self {
            select_revealed: true,
            update_active: true,
            search_limit: None,
        }
    }
}

impl UnveilConfig {
    /// Set whether revealed entities are selected.
    pub fn with_select_revealed(mut self, select: bool) -> Self {
        self.select_revealed = select;
        self
    }

    /// Set whether the active pointer follows the last revealed entity.
    pub fn with_update_active(mut self, update: bool) -> Self {
        self.update_active = update;
        self
    }

    /// Cap the number of catalogue search results.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = Some(limit);
        self
    }
}
