//! Resolves the selected category from a page's query string.

use url::form_urlencoded;

use crate::category::ALL;

/// The query parameter holding the selected category.
pub const CATEGORY_PARAM: &str = "category";

/// Returns the category selected by `raw_query` (e.g., `?category=Web`). The
/// leading `?` is optional. Falls back to [`ALL`] when the `category`
/// parameter is missing, empty, or given more than once. Any other value is
/// returned as-is, whether or not a post uses it.
pub fn resolve_selection(raw_query: &str) -> String {
    let query = raw_query.strip_prefix('?').unwrap_or(raw_query);

    let mut values = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == CATEGORY_PARAM)
        .map(|(_, value)| value);

    match (values.next(), values.next()) {
        (Some(value), None) if !value.is_empty() => value.into_owned(),
        _ => ALL.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolve_selection_empty() {
        assert_eq!("All", resolve_selection(""));
        assert_eq!("All", resolve_selection("?"));
    }

    #[test]
    fn test_resolve_selection_single() {
        assert_eq!("Web", resolve_selection("?category=Web"));
    }

    #[test]
    fn test_resolve_selection_without_question_mark() {
        assert_eq!("Web", resolve_selection("category=Web"));
    }

    #[test]
    fn test_resolve_selection_empty_value() {
        assert_eq!("All", resolve_selection("?category="));
        assert_eq!("All", resolve_selection("?category"));
    }

    #[test]
    fn test_resolve_selection_repeated_key() {
        assert_eq!("All", resolve_selection("?category=Web&category=Mobile"));
        assert_eq!("All", resolve_selection("?category=Web&category=Web"));
        assert_eq!("All", resolve_selection("?category=&category=Web"));
    }

    #[test]
    fn test_resolve_selection_other_params() {
        assert_eq!("All", resolve_selection("?other=1"));
        assert_eq!("Web", resolve_selection("?other=1&category=Web&page=2"));
    }

    #[test]
    fn test_resolve_selection_percent_decoding() {
        assert_eq!("C++ & Rust", resolve_selection("?category=C%2B%2B%20%26%20Rust"));
        assert_eq!("Machine Learning", resolve_selection("?category=Machine+Learning"));
        assert_eq!("Web", resolve_selection("?%63ategory=Web"));
    }

    #[test]
    fn test_resolve_selection_unknown_category_passes_through() {
        assert_eq!("Nonexistent", resolve_selection("?category=Nonexistent"));
    }

    #[test]
    fn test_resolve_selection_case_sensitive_key() {
        assert_eq!("All", resolve_selection("?Category=Web"));
    }
}
