//! Index configuration.

use crate::error::{Result, SymSpellError};

/// Construction-time options for an [`crate::index::Index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub max_edit_distance: u8,
    pub prefix_length: usize,
    pub count_threshold: i64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
        }
    }
}

impl IndexConfig {
    pub fn with_max_edit_distance(mut self, m: u8) -> Self {
        self.max_edit_distance = m;
        self
    }

    pub fn with_prefix_length(mut self, p: usize) -> Self {
        self.prefix_length = p;
        self
    }

    pub fn with_count_threshold(mut self, t: i64) -> Self {
        self.count_threshold = t;
        self
    }

    /// Rejects structurally invalid configurations (`prefix_length <
    /// max_edit_distance`, or a non-positive `count_threshold`).
    pub(crate) fn validate(&self) -> Result<()> {
        if self.prefix_length < self.max_edit_distance as usize {
            return Err(SymSpellError::InvalidConfig {
                message: format!(
                    "prefix_length ({}) must be >= max_edit_distance ({})",
                    self.prefix_length, self.max_edit_distance
                ),
            });
        }
        if self.count_threshold < 1 {
            return Err(SymSpellError::InvalidConfig {
                message: format!(
                    "count_threshold ({}) must be >= 1",
                    self.count_threshold
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let c = IndexConfig::default();
        assert_eq!(c.max_edit_distance, 2);
        assert_eq!(c.prefix_length, 7);
        assert_eq!(c.count_threshold, 1);
    }

    #[test]
    fn rejects_prefix_shorter_than_max_distance() {
        let c = IndexConfig::default().with_prefix_length(1).with_max_edit_distance(2);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_threshold() {
        let c = IndexConfig::default().with_count_threshold(0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn builder_methods_chain() {
        let c = IndexConfig::default()
            .with_max_edit_distance(3)
            .with_prefix_length(8)
            .with_count_threshold(5);
        assert_eq!(c.max_edit_distance, 3);
        assert_eq!(c.prefix_length, 8);
        assert_eq!(c.count_threshold, 5);
        assert!(c.validate().is_ok());
    }
}
