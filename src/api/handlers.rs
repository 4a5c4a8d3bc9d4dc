use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    matcher::{registry::NamedCatalog, resolve, resolve_term, suggest, CatalogRegistry},
    utils::{split_terms, validate_query},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CatalogRegistry>,
    pub settings: crate::config::Settings,
}

/// Resolve the query against one catalog and collect the makeable recipes
fn run_suggest(
    named: &NamedCatalog,
    params: &SuggestParams,
    max_query_length: usize,
) -> Result<SuggestResponse> {
    let have = validate_query(&params.have, max_query_length)?;
    let terms = split_terms(have);

    let resolution = resolve(&named.catalog, &terms);
    let suggestions: Vec<_> = suggest(&named.catalog, &resolution.mapped)
        .into_iter()
        .cloned()
        .collect();

    debug!(
        "Catalog '{}': {} terms, {} mapped, {} unrecognized, {} suggestions",
        named.name,
        terms.len(),
        resolution.mapped.len(),
        resolution.unknown.len(),
        suggestions.len()
    );

    let explain = params.explain.then(|| {
        terms
            .iter()
            .map(|term| TermExplanation {
                term: term.clone(),
                resolution: resolve_term(&named.catalog, term),
            })
            .collect()
    });

    Ok(SuggestResponse {
        mapped: resolution.mapped,
        unrecognized: resolution.unknown,
        suggestions,
        explain,
    })
}

/// GET /api/suggest - Suggest recipes from the default catalog
pub async fn suggest_default(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>> {
    debug!("Suggest request: {:?}", params);

    let named = state.registry.default_catalog()?;
    let response = run_suggest(&named, &params, state.settings.limits.max_query_length)?;
    Ok(Json(response))
}

/// GET /api/catalogs/:name/suggest - Suggest recipes from a named catalog
pub async fn suggest_in_catalog(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>> {
    debug!("Suggest request for catalog '{}': {:?}", name, params);

    let named = state.registry.get(&name)?;
    let response = run_suggest(&named, &params, state.settings.limits.max_query_length)?;
    Ok(Json(response))
}

/// GET /api/ingredients - Sorted canonical ingredient names of the default catalog
pub async fn list_default_ingredients(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let named = state.registry.default_catalog()?;
    Ok(Json(named.catalog.all_ingredients().to_vec()))
}

/// GET /api/catalogs/:name/ingredients - Sorted canonical ingredient names
pub async fn list_catalog_ingredients(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>> {
    let named = state.registry.get(&name)?;
    Ok(Json(named.catalog.all_ingredients().to_vec()))
}

/// GET /api/catalogs - List loaded catalogs
pub async fn list_catalogs(State(state): State<AppState>) -> Result<Json<CatalogsResponse>> {
    Ok(Json(CatalogsResponse {
        catalogs: state.registry.summaries(),
    }))
}

/// GET /api/stats - Get system statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let mut catalogs = Vec::new();
    for summary in state.registry.summaries() {
        let named = state.registry.get(&summary.name)?;
        catalogs.push(CatalogStatsEntry {
            name: summary.name,
            stats: named.catalog.stats(),
        });
    }

    Ok(Json(Stats {
        total_catalogs: catalogs.len(),
        total_recipes: catalogs.iter().map(|c| c.stats.recipes).sum(),
        catalogs,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    // Catalogs are loaded before the router exists; ready means the default resolves
    let ready = !state.registry.is_empty() && state.registry.default_catalog().is_ok();

    Ok(Json(ReadinessResponse {
        ready,
        catalogs: state.registry.len(),
        default_catalog: state.registry.default_name().to_string(),
    }))
}
