//! Shared option types that replace boolean flag parameters in the API.

use serde::{Deserialize, Serialize};

/// Controls whether row keys carry a shard-balancing hash prefix.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum RowKeyHashing {
    /// Prefix every row key with a fixed-width hash of its leading value.
    Enabled,
    /// Store row keys as plain positional encodings.
    #[default]
    Disabled,
}

impl RowKeyHashing {
    pub fn is_enabled(self) -> bool {
        matches!(self, RowKeyHashing::Enabled)
    }
}

impl From<bool> for RowKeyHashing {
    fn from(value: bool) -> Self {
        if value {
            RowKeyHashing::Enabled
        } else {
            RowKeyHashing::Disabled
        }
    }
}

impl From<RowKeyHashing> for bool {
    fn from(value: RowKeyHashing) -> Self {
        value.is_enabled()
    }
}
