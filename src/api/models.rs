use crate::matcher::{registry::CatalogSummary, CatalogStats, Recipe, TermResolution};
use serde::{Deserialize, Serialize};

/// Suggest request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub have: String, // Comma/semicolon/newline separated ingredient list
    #[serde(default)]
    pub explain: bool,
}

/// Suggest response. Lists are always present, possibly empty.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestResponse {
    pub mapped: Vec<String>,
    pub unrecognized: Vec<String>,
    pub suggestions: Vec<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<Vec<TermExplanation>>,
}

/// How one raw term was matched, returned with `explain=true`
#[derive(Debug, Clone, Serialize)]
pub struct TermExplanation {
    pub term: String,
    #[serde(flatten)]
    pub resolution: TermResolution,
}

/// Catalog list response
#[derive(Debug, Clone, Serialize)]
pub struct CatalogsResponse {
    pub catalogs: Vec<CatalogSummary>,
}

/// Per-catalog statistics
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatsEntry {
    pub name: String,
    #[serde(flatten)]
    pub stats: CatalogStats,
}

/// System statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_catalogs: usize,
    pub total_recipes: usize,
    pub catalogs: Vec<CatalogStatsEntry>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub catalogs: usize,
    pub default_catalog: String,
}
