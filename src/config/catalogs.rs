use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest of the recipe catalogs a process serves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub version: u32,
    /// Catalog answering the un-prefixed `/api/suggest` routes
    pub default: String,
    pub catalogs: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// CSV path; relative paths are resolved against the manifest directory
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn name_pattern() -> Result<Regex> {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$")
        .map_err(|e| Error::Internal(format!("Invalid catalog name pattern: {e}")))
}

impl CatalogConfig {
    /// Load a manifest from a YAML file, resolving catalog paths against it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read catalog config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: CatalogConfig = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse catalog config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for entry in &mut config.catalogs {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Manifest with a single catalog, used when a CSV path is given directly
    pub fn single(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            version: 1,
            default: name.to_string(),
            catalogs: vec![CatalogEntry {
                name: name.to_string(),
                title: None,
                path: path.into(),
                enabled: true,
            }],
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported config version: {}. Expected version 1",
                self.version
            )));
        }

        let pattern = name_pattern()?;
        let mut seen = HashSet::new();
        for (index, entry) in self.catalogs.iter().enumerate() {
            if !pattern.is_match(&entry.name) {
                return Err(Error::Config(format!(
                    "Catalog #{} has invalid name '{}': use lowercase letters, digits, '-' or '_'",
                    index + 1,
                    entry.name
                )));
            }
            if !seen.insert(&entry.name) {
                return Err(Error::Config(format!(
                    "Duplicate catalog name: {}",
                    entry.name
                )));
            }
            if entry.path.as_os_str().is_empty() {
                return Err(Error::Config(format!(
                    "Catalog '{}' has an empty path",
                    entry.name
                )));
            }
        }

        if self.enabled_count() == 0 {
            return Err(Error::Config("No enabled catalogs".to_string()));
        }

        if !self.enabled_catalogs().any(|c| c.name == self.default) {
            return Err(Error::Config(format!(
                "Default catalog '{}' is not an enabled catalog",
                self.default
            )));
        }

        Ok(())
    }

    /// Get an iterator over enabled catalogs
    pub fn enabled_catalogs(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.catalogs.iter().filter(|c| c.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled_catalogs().count()
    }
}
