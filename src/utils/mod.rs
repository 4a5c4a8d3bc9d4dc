// Utility functions
pub mod terms;
pub mod validation;

pub use terms::split_terms;
pub use validation::validate_query;
