//! Configuration structures for the Strata indexes.

use crate::error::{Result, StrataError};
use serde::{Deserialize, Serialize};

/// Configuration for the B-Tree index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BTreeConfig {
    /// Minimum degree `t`. Every non-root node holds between `t - 1` and
    /// `2t - 1` keys; a node with `2t - 1` keys is full and splits on the
    /// next descent through it.
    pub order: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self { order: 3 }
    }
}

impl BTreeConfig {
    /// Rejects orders below 2; a B-Tree of degree 0 or 1 cannot split.
    pub fn validate(&self) -> Result<()> {
        if self.order < 2 {
            return Err(StrataError::invalid_parameter("order", self.order));
        }
        Ok(())
    }

    /// Maximum keys a node may hold (`2t - 1`).
    pub fn max_keys(&self) -> usize {
        2 * self.order - 1
    }

    /// Minimum keys a non-root node must hold (`t - 1`).
    pub fn min_keys(&self) -> usize {
        self.order - 1
    }
}

/// Configuration for the learned index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmiConfig {
    /// Number of level-1 segment models.
    pub segment_count: usize,
    /// Half-width of the correction window scanned around a predicted
    /// position. A wider window tolerates worse model error at the cost of
    /// a longer scan.
    pub search_window: usize,
}

impl Default for RmiConfig {
    fn default() -> Self {
        Self {
            segment_count: 100,
            search_window: 50,
        }
    }
}

impl RmiConfig {
    /// Rejects a cascade with no level-1 slots.
    pub fn validate(&self) -> Result<()> {
        if self.segment_count < 1 {
            return Err(StrataError::invalid_parameter(
                "segment_count",
                self.segment_count,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_config_defaults() {
        let config = BTreeConfig::default();
        assert_eq!(config.order, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_btree_config_key_bounds() {
        let config = BTreeConfig { order: 2 };
        assert_eq!(config.min_keys(), 1);
        assert_eq!(config.max_keys(), 3);

        let config = BTreeConfig { order: 16 };
        assert_eq!(config.min_keys(), 15);
        assert_eq!(config.max_keys(), 31);
    }

    #[test]
    fn test_btree_config_rejects_small_order() {
        for order in [0, 1] {
            let err = BTreeConfig { order }.validate().unwrap_err();
            assert!(matches!(err, StrataError::InvalidParameter { .. }));
        }
        assert!(BTreeConfig { order: 2 }.validate().is_ok());
    }

    #[test]
    fn test_rmi_config_defaults() {
        let config = RmiConfig::default();
        assert_eq!(config.segment_count, 100);
        assert_eq!(config.search_window, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rmi_config_rejects_zero_segments() {
        let err = RmiConfig {
            segment_count: 0,
            search_window: 10,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, StrataError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rmi_config_zero_window_is_legal() {
        // A zero window degenerates to probing only the predicted position.
        let config = RmiConfig {
            segment_count: 4,
            search_window: 0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let original = BTreeConfig { order: 5 };
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: BTreeConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, deserialized);

        let original = RmiConfig {
            segment_count: 7,
            search_window: 3,
        };
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: RmiConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(original, deserialized);
    }
}
