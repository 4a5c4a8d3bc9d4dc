use crate::error::{Error, Result};
use crate::matcher::normalize::normalize;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Header columns every recipe source must carry
pub const INPUT_COLUMNS: [&str; 3] = ["input1_name", "input2_name", "input3_name"];
pub const OUTPUT_NAME_COLUMN: &str = "output_name";
pub const OUTPUT_QTY_COLUMN: &str = "output_qty";

/// A single recipe row: up to three inputs producing `qty` of `output`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub inputs: Vec<String>,
    pub output: String,
    pub qty: u32,
}

/// Two distinct ingredient names that fold to the same normalized key.
/// `kept` is the name the lookup answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCollision {
    pub key: String,
    pub kept: String,
    pub replaced: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub recipes: usize,
    pub ingredients: usize,
    pub skipped_rows: usize,
}

/// Ingredient candidate for fuzzy matching, key computed once at load
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub key: String,
    pub name: String,
}

/// Immutable, in-memory recipe catalog.
///
/// Recipe IDs are positions in `recipes()` and stay stable for the life of
/// the value. Build it once and share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    all_ingredients: Vec<String>,
    ingredient_index: HashMap<String, Vec<usize>>,
    normalized_lookup: HashMap<String, String>,
    candidates: Vec<Candidate>,
    collisions: Vec<NormalizedCollision>,
    skipped_rows: usize,
}

struct ColumnMap {
    inputs: [usize; 3],
    output_name: usize,
    output_qty: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let find = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| Error::Format(format!("missing required column: {name}")))
        };

        Ok(Self {
            inputs: [
                find(INPUT_COLUMNS[0])?,
                find(INPUT_COLUMNS[1])?,
                find(INPUT_COLUMNS[2])?,
            ],
            output_name: find(OUTPUT_NAME_COLUMN)?,
            output_qty: find(OUTPUT_QTY_COLUMN)?,
        })
    }
}

fn cell(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

/// Turn one data row into a recipe, or `None` when it has no output or no inputs
fn parse_row(record: &csv::StringRecord, columns: &ColumnMap) -> Option<Recipe> {
    let inputs: Vec<String> = columns
        .inputs
        .iter()
        .map(|&idx| cell(record, idx))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    let output = cell(record, columns.output_name);
    if output.is_empty() || inputs.is_empty() {
        return None;
    }

    let qty = cell(record, columns.output_qty)
        .parse::<u32>()
        .ok()
        .filter(|q| *q > 0)
        .unwrap_or(1);

    Some(Recipe {
        inputs,
        output: output.to_string(),
        qty,
    })
}

impl Catalog {
    /// Load a catalog from a CSV file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;

        info!(
            "Loaded recipe catalog from {}: {} recipes, {} ingredients ({} rows skipped)",
            path.display(),
            catalog.recipes.len(),
            catalog.all_ingredients.len(),
            catalog.skipped_rows
        );

        Ok(catalog)
    }

    /// Load a catalog from any header-bearing CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

        let mut recipes = Vec::new();
        let mut data_rows = 0usize;
        let mut skipped_rows = 0usize;

        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            data_rows += 1;

            match parse_row(&record, &columns) {
                Some(recipe) => recipes.push(recipe),
                None => {
                    debug!("Skipping recipe row {}: missing output or inputs", line + 2);
                    skipped_rows += 1;
                }
            }
        }

        if data_rows == 0 {
            return Err(Error::Format("recipe source has no data rows".to_string()));
        }

        Ok(Self::from_recipes(recipes, skipped_rows))
    }

    /// Build the ingredient index and lookup tables over already-parsed recipes
    fn from_recipes(recipes: Vec<Recipe>, skipped_rows: usize) -> Self {
        let mut ingredient_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut normalized_lookup: HashMap<String, String> = HashMap::new();
        let mut collisions = Vec::new();
        let mut names = BTreeSet::new();

        for (id, recipe) in recipes.iter().enumerate() {
            for name in &recipe.inputs {
                ingredient_index.entry(name.clone()).or_default().push(id);
                names.insert(name.clone());

                let key = normalize(name);
                if let Some(previous) = normalized_lookup.insert(key.clone(), name.clone()) {
                    if previous != *name {
                        warn!(
                            "Ingredients '{}' and '{}' share normalized key '{}'; keeping '{}'",
                            previous, name, key, name
                        );
                        collisions.push(NormalizedCollision {
                            key,
                            kept: name.clone(),
                            replaced: previous,
                        });
                    }
                }
            }
        }

        let all_ingredients: Vec<String> = names.into_iter().collect();
        let candidates = all_ingredients
            .iter()
            .map(|name| Candidate {
                key: normalize(name),
                name: name.clone(),
            })
            .collect();

        Self {
            recipes,
            all_ingredients,
            ingredient_index,
            normalized_lookup,
            candidates,
            collisions,
            skipped_rows,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, id: usize) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Every distinct input ingredient, sorted
    pub fn all_ingredients(&self) -> &[String] {
        &self.all_ingredients
    }

    /// Recipe IDs that list `name` as an input. May repeat an ID when a
    /// recipe names the same ingredient twice.
    pub fn recipes_using(&self, name: &str) -> &[usize] {
        self.ingredient_index
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Canonical ingredient name for an already-normalized key
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.normalized_lookup.get(key).map(String::as_str)
    }

    pub fn collisions(&self) -> &[NormalizedCollision] {
        &self.collisions
    }

    pub(crate) fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            recipes: self.recipes.len(),
            ingredients: self.all_ingredients.len(),
            skipped_rows: self.skipped_rows,
        }
    }
}
