use crate::matcher::catalog::{Catalog, Recipe};
use std::collections::HashSet;

/// Recipes that can be made entirely from `resolved`.
///
/// Candidates come from the ingredient index postings of the supplied
/// names (linear in the number of postings); a candidate survives only if
/// every one of its inputs is in the resolved set. Results keep the order
/// in which candidates were first produced. No ingredients, no recipes.
pub fn suggest<'a, S: AsRef<str>>(catalog: &'a Catalog, resolved: &[S]) -> Vec<&'a Recipe> {
    if resolved.is_empty() {
        return Vec::new();
    }

    let have: HashSet<&str> = resolved.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for ingredient in resolved {
        for &id in catalog.recipes_using(ingredient.as_ref()) {
            if !seen.insert(id) {
                continue;
            }
            let Some(recipe) = catalog.recipe(id) else {
                continue;
            };
            if recipe.inputs.iter().all(|input| have.contains(input.as_str())) {
                suggestions.push(recipe);
            }
        }
    }

    suggestions
}
