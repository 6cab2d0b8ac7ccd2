/// Deepest tree the engine will ever build (4^15 leaves).
pub const MAX_SUPPORTED_DEPTH: usize = 15;

/// Configuration settings for a gene-indexing session.
///
/// Controls how large a tree `bio start` may allocate and how results are
/// laid out on the console.
///
/// # Examples
///
/// ```rust
/// use genetrie::config::EngineConfig;
///
/// let config = EngineConfig {
///     max_depth: 8,
///     ..Default::default()
/// };
/// assert_eq!(config.wrap_width, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest m accepted by `bio start`.
    ///
    /// A tree of height m holds `(4^(m+1) - 1) / 3` nodes, allocated eagerly.
    pub max_depth: usize,

    /// Optional cap on the number of nodes a single build may allocate.
    pub node_limit: Option<usize>,

    /// Column at which long offset lists are wrapped.
    pub wrap_width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            node_limit: None,
            wrap_width: 80,
        }
    }
}

impl EngineConfig {
    /// Checks that the settings are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 || self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(format!(
                "max depth must be 1-{} (got {})",
                MAX_SUPPORTED_DEPTH, self.max_depth
            ));
        }
        if self.wrap_width < 20 {
            return Err(format!("wrap width must be at least 20 (got {})", self.wrap_width));
        }
        Ok(())
    }
}
