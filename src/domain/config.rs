use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::display_id::IdGenerator;

/// Configuration for a requirement store.
///
/// Controls how display identifiers are issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Prefix of generated display IDs.
    ///
    /// For example, 'REQ' gives 'REQ-00000001'.
    id_prefix: String,

    /// The number of digits in generated display IDs.
    ///
    /// Numbers are padded to this width with leading zeros.
    digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            digits: default_digits(),
        }
    }
}

impl Config {
    /// Creates a configuration with the given prefix and digit width.
    #[must_use]
    pub fn new(id_prefix: impl Into<String>, digits: usize) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            digits,
        }
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the prefix of generated display IDs.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Returns the number of digits for padding display IDs.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.digits
    }

    /// A fresh identity generator following this configuration.
    #[must_use]
    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::new(self.id_prefix.clone(), self.digits)
    }
}

fn default_id_prefix() -> String {
    "REQ".to_string()
}

const fn default_digits() -> usize {
    8
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_id_prefix")]
        id_prefix: String,

        #[serde(default = "default_digits")]
        digits: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { id_prefix, digits } => Self { id_prefix, digits },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            id_prefix: config.id_prefix,
            digits: config.digits,
        }
    }
}
