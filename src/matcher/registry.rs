use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::matcher::catalog::Catalog;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// A loaded catalog plus the manifest metadata it was declared with
#[derive(Debug)]
pub struct NamedCatalog {
    pub name: String,
    pub title: Option<String>,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub name: String,
    pub title: Option<String>,
    pub recipes: usize,
    pub ingredients: usize,
    pub default: bool,
}

/// Named catalogs served by one process. Built once, then read-only.
#[derive(Debug, Clone)]
pub struct CatalogRegistry {
    default: String,
    catalogs: BTreeMap<String, Arc<NamedCatalog>>,
}

impl CatalogRegistry {
    /// Load every enabled catalog in the manifest. Any load failure, or a
    /// catalog that yields no usable recipes, aborts the whole registry.
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let mut registry = Self {
            default: config.default.clone(),
            catalogs: BTreeMap::new(),
        };

        for entry in config.enabled_catalogs() {
            let catalog = Catalog::from_path(&entry.path).map_err(|e| match e {
                Error::Format(msg) => Error::Format(format!(
                    "catalog '{}' ({}): {}",
                    entry.name,
                    entry.path.display(),
                    msg
                )),
                other => other,
            })?;

            if catalog.is_empty() {
                return Err(Error::Format(format!(
                    "no recipes parsed from {}",
                    entry.path.display()
                )));
            }

            info!(
                "Catalog '{}' ready: {} recipes, {} ingredients",
                entry.name,
                catalog.stats().recipes,
                catalog.stats().ingredients
            );

            registry.insert(&entry.name, entry.title.clone(), catalog);
        }

        if !registry.catalogs.contains_key(&registry.default) {
            return Err(Error::Config(format!(
                "Default catalog '{}' was not loaded",
                registry.default
            )));
        }

        Ok(registry)
    }

    /// Registry holding one catalog, which is also the default
    pub fn single(name: &str, catalog: Catalog) -> Self {
        let mut registry = Self {
            default: name.to_string(),
            catalogs: BTreeMap::new(),
        };
        registry.insert(name, None, catalog);
        registry
    }

    fn insert(&mut self, name: &str, title: Option<String>, catalog: Catalog) {
        self.catalogs.insert(
            name.to_string(),
            Arc::new(NamedCatalog {
                name: name.to_string(),
                title,
                catalog,
            }),
        );
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn default_catalog(&self) -> Result<Arc<NamedCatalog>> {
        self.get(&self.default)
    }

    pub fn get(&self, name: &str) -> Result<Arc<NamedCatalog>> {
        self.catalogs
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Catalog '{name}' not found")))
    }

    /// Pick a named catalog, or the default when no name is given
    pub fn select(&self, name: Option<&str>) -> Result<Arc<NamedCatalog>> {
        match name {
            Some(name) => self.get(name),
            None => self.default_catalog(),
        }
    }

    /// Summaries in name order
    pub fn summaries(&self) -> Vec<CatalogSummary> {
        self.catalogs
            .values()
            .map(|named| {
                let stats = named.catalog.stats();
                CatalogSummary {
                    name: named.name.clone(),
                    title: named.title.clone(),
                    recipes: stats.recipes,
                    ingredients: stats.ingredients,
                    default: named.name == self.default,
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
