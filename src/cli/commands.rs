use crate::config::{CatalogConfig, Settings};
use crate::matcher::{resolve, resolve_term, suggest as suggest_recipes, Catalog, CatalogRegistry};
use crate::matcher::{Recipe, TermResolution};
use crate::utils::{split_terms, validate_query};
use crate::{Error, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load the catalogs a command works on: an explicit CSV, or the configured manifest
pub fn load_registry(settings: &Settings, csv: Option<PathBuf>) -> Result<CatalogRegistry> {
    let config = match csv {
        Some(path) => CatalogConfig::single("default", path),
        None => settings.catalog_config()?,
    };

    info!(
        "Loading {} catalog(s), default '{}'",
        config.enabled_count(),
        config.default
    );
    CatalogRegistry::load(&config)
}

/// Suggest recipes for a free-text ingredient list
pub fn suggest(
    registry: &CatalogRegistry,
    catalog: Option<&str>,
    have: &str,
    explain: bool,
    max_query_length: usize,
) -> Result<()> {
    let named = registry.select(catalog)?;
    let have = validate_query(have, max_query_length)?;
    let terms = split_terms(have);

    if explain {
        print!("{}", render_explanation(&named.catalog, &terms));
    }

    let resolution = resolve(&named.catalog, &terms);
    let recipes = suggest_recipes(&named.catalog, &resolution.mapped);

    println!("Catalog: {}", named.name);
    println!("Mapped: {}", list_or_none(&resolution.mapped));
    println!("Unrecognized: {}", list_or_none(&resolution.unknown));
    print!("{}", render_recipes(&recipes));

    Ok(())
}

/// Print every canonical ingredient, one per line
pub fn ingredients(registry: &CatalogRegistry, catalog: Option<&str>) -> Result<()> {
    let named = registry.select(catalog)?;
    for name in named.catalog.all_ingredients() {
        println!("{name}");
    }
    Ok(())
}

/// Load a CSV on its own and report counts, skipped rows and normalization collisions
pub fn check(path: &Path) -> Result<()> {
    let catalog = Catalog::from_path(path)?;
    let stats = catalog.stats();

    println!("\u{2713} Loaded: {}", path.display());
    println!("  Recipes: {}", stats.recipes);
    println!("  Ingredients: {}", stats.ingredients);
    println!("  Skipped rows: {}", stats.skipped_rows);

    if !catalog.collisions().is_empty() {
        println!("\nNormalization collisions (last name wins):");
        for collision in catalog.collisions() {
            println!(
                "  {:<24} {} -> {}",
                collision.key, collision.replaced, collision.kept
            );
        }
    }

    if catalog.is_empty() {
        return Err(Error::Format(format!(
            "no recipes parsed from {}",
            path.display()
        )));
    }

    Ok(())
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn render_recipes(recipes: &[&Recipe]) -> String {
    let mut out = String::new();

    if recipes.is_empty() {
        out.push_str("\nNo recipes can be made\n");
        return out;
    }

    let _ = writeln!(out, "\nCan make {} recipes:\n", recipes.len());
    let _ = writeln!(out, "{:<30} {:<5} {:<40}", "Output", "Qty", "Inputs");
    let _ = writeln!(out, "{}", "-".repeat(75));

    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:<30} {:<5} {:<40}",
            truncate(&recipe.output, 28),
            recipe.qty,
            truncate(&recipe.inputs.join(", "), 40)
        );
    }

    out
}

fn render_explanation(catalog: &Catalog, terms: &[String]) -> String {
    let mut out = String::new();

    for term in terms {
        let line = match resolve_term(catalog, term) {
            TermResolution::Dropped => "dropped".to_string(),
            TermResolution::Exact { name } => format!("exact {name}"),
            TermResolution::Fuzzy { name, score } => format!("fuzzy {name} (score {score:.1})"),
            TermResolution::Unknown { best: Some((name, score)) } => {
                format!("unknown (closest {name}, score {score:.1})")
            }
            TermResolution::Unknown { best: None } => "unknown".to_string(),
        };
        let _ = writeln!(out, "  {:<24} {}", truncate(term, 24), line);
    }

    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
