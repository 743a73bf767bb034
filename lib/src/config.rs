//! Defines the configuration consumed when a triple context is built.
//! The deployment supplies these knobs once; the context caches them.

use crate::consts::DEFAULT_TABLE_PREFIX;
use crate::options::RowKeyHashing;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_string()
}

/// Storage-layer knobs for row production.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RyaConfig {
    /// Prefix row keys with a value hash to balance shards.
    #[serde(default)]
    pub row_key_hashing: RowKeyHashing,
    /// Prefix for the physical table names.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

impl Default for RyaConfig {
    fn default() -> Self {
        RyaConfig {
            row_key_hashing: RowKeyHashing::Disabled,
            table_prefix: default_table_prefix(),
        }
    }
}

impl RyaConfig {
    pub fn new(row_key_hashing: impl Into<RowKeyHashing>, table_prefix: impl Into<String>) -> Self {
        RyaConfig {
            row_key_hashing: row_key_hashing.into(),
            table_prefix: table_prefix.into(),
        }
    }

    pub fn save_to_file(&self, file: &Path) -> std::io::Result<()> {
        let config_str = serde_json::to_string_pretty(&self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> std::io::Result<Self> {
        let reader = BufReader::new(std::fs::File::open(file)?);
        let config: RyaConfig = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        info!(
            "loaded config: hashing={:?} table_prefix={}",
            config.row_key_hashing, config.table_prefix
        );
        Ok(config)
    }

    /// Prints out the current config in a clear and readable way for
    /// command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Row Key Hashing: {}", self.row_key_hashing.is_enabled());
        println!("  Table Prefix: {}", self.table_prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RyaConfig::default();
        assert!(!config.row_key_hashing.is_enabled());
        assert_eq!(config.table_prefix, "rya_");
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(RowKeyHashing::from(true), RowKeyHashing::Enabled);
        assert_eq!(RowKeyHashing::from(false), RowKeyHashing::Disabled);
        assert!(bool::from(RowKeyHashing::Enabled));
    }
}
