// Splitting of the free-text ingredient query

/// Split a query like `"salt, water; flour\nyeast"` into trimmed terms.
/// Any run of commas, semicolons or line breaks separates terms; empty
/// segments are dropped.
pub fn split_terms(text: &str) -> Vec<String> {
    text.split(|c| matches!(c, ',' | ';' | '\n' | '\r'))
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_terms() {
        assert_eq!(
            split_terms("salt, water;flour\nyeast"),
            vec!["salt", "water", "flour", "yeast"]
        );
    }

    #[test]
    fn test_split_terms_collapses_separator_runs() {
        assert_eq!(
            split_terms(",,salt ;;\r\n\n , water,"),
            vec!["salt", "water"]
        );
    }

    #[test]
    fn test_split_terms_keeps_inner_spaces() {
        assert_eq!(
            split_terms("  sea salt  ,  frost crystal "),
            vec!["sea salt", "frost crystal"]
        );
    }

    #[test]
    fn test_split_terms_empty() {
        assert!(split_terms("").is_empty());
        assert!(split_terms(" , ;\n").is_empty());
    }
}
