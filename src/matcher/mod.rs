// Ingredient matching core: catalog loading, term resolution and recipe lookup

pub mod catalog;
pub mod distance;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod suggest;

// Re-exports
pub use catalog::{Catalog, CatalogStats, NormalizedCollision, Recipe};
pub use distance::levenshtein;
pub use normalize::normalize;
pub use registry::CatalogRegistry;
pub use resolver::{resolve, resolve_term, Resolution, TermResolution};
pub use suggest::suggest;
