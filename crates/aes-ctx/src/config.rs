//! Store configuration.

/// Settings for a [`ContextStore`](crate::ContextStore).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Upper bound on simultaneously live contexts; `None` means unbounded.
    pub max_contexts: Option<usize>,
}

impl StoreConfig {
    /// Configuration that caps the number of live contexts.
    pub fn with_max_contexts(limit: usize) -> Self {
        Self {
            max_contexts: Some(limit),
        }
    }
}
