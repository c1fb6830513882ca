//! Two-stage product filtering.
//!
//! Queries are matched in two passes with explicit matcher strategies:
//! a primary pass driven by the first search term, and a fallback pass
//! over all terms that only runs when the primary pass matches nothing.
//! Products are always returned in catalog order.

use super::Product;

/// A matching strategy applied to a single product.
pub trait ProductMatcher {
    fn matches(&self, product: &Product) -> bool;
}

/// Primary strategy: match on the first search term only.
///
/// A product matches when its lowercased title contains the term, or any
/// keyword matches the term (see [`term_matches_keyword`]).
pub struct FirstTermMatcher<'a> {
    term: &'a str,
}

impl<'a> FirstTermMatcher<'a> {
    #[must_use]
    pub const fn new(term: &'a str) -> Self {
        Self { term }
    }
}

impl ProductMatcher for FirstTermMatcher<'_> {
    fn matches(&self, product: &Product) -> bool {
        term_matches_product(self.term, product)
    }
}

/// Fallback strategy: match when ANY search term matches.
///
/// Applies the same per-term rule as [`FirstTermMatcher`], but a product
/// qualifies as soon as one of the terms matches it.
pub struct AnyTermMatcher<'a> {
    terms: &'a [String],
}

impl<'a> AnyTermMatcher<'a> {
    #[must_use]
    pub const fn new(terms: &'a [String]) -> Self {
        Self { terms }
    }
}

impl ProductMatcher for AnyTermMatcher<'_> {
    fn matches(&self, product: &Product) -> bool {
        self.terms
            .iter()
            .any(|term| term_matches_product(term, product))
    }
}

/// Per-term product rule shared by both strategies.
fn term_matches_product(term: &str, product: &Product) -> bool {
    product.title.to_lowercase().contains(term)
        || product
            .keywords
            .iter()
            .any(|keyword| term_matches_keyword(term, keyword))
}

/// Substring containment in either direction.
///
/// "key" matches keyword "keychain", and "keychains" matches keyword
/// "keychain". Exact equality is covered by both directions.
fn term_matches_keyword(term: &str, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    keyword.contains(term) || term.contains(keyword.as_str())
}

/// Filter products against a free-text query.
///
/// The query is lowercased and split on whitespace into terms. An empty
/// or whitespace-only query returns the full slice in catalog order.
/// Otherwise the primary pass runs with [`FirstTermMatcher`]; if it
/// yields nothing, the fallback pass runs with [`AnyTermMatcher`]. The
/// result of whichever pass produced matches is returned, preserving
/// catalog order. Both passes empty means an empty result.
#[must_use]
pub fn filter<'a>(query: &str, products: &'a [Product]) -> Vec<&'a Product> {
    let terms: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let Some(first_term) = terms.first() else {
        return products.iter().collect();
    };

    let primary = apply(&FirstTermMatcher::new(first_term), products);
    if !primary.is_empty() {
        return primary;
    }

    apply(&AnyTermMatcher::new(&terms), products)
}

fn apply<'a>(matcher: &dyn ProductMatcher, products: &'a [Product]) -> Vec<&'a Product> {
    products.iter().filter(|p| matcher.matches(p)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn titles(results: &[&Product]) -> Vec<String> {
        results
            .iter()
            .map(|p| p.title.chars().take(20).collect())
            .collect()
    }

    fn ids(results: &[&Product]) -> Vec<i32> {
        results.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_empty_query_returns_full_catalog_in_order() {
        let catalog = Catalog::builtin();
        let results = filter("", catalog.all());
        assert_eq!(ids(&results), (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_whitespace_query_returns_full_catalog() {
        let catalog = Catalog::builtin();
        let results = filter("   \t  ", catalog.all());
        assert_eq!(results.len(), catalog.all().len());
    }

    #[test]
    fn test_single_term_matches_keyword_exactly() {
        let catalog = Catalog::builtin();
        let results = filter("mouse", catalog.all());
        assert_eq!(ids(&results), vec![11]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let lower = filter("keychain", catalog.all());
        let upper = filter("KEYCHAIN", catalog.all());
        assert_eq!(ids(&lower), ids(&upper));
        assert_eq!(ids(&lower), vec![2, 3]);
    }

    #[test]
    fn test_term_contained_by_keyword_matches() {
        // "key" is a substring of the "keychain" keyword
        let catalog = Catalog::builtin();
        let results = filter("key", catalog.all());
        assert_eq!(ids(&results), vec![2, 3]);
    }

    #[test]
    fn test_keyword_contained_by_term_matches() {
        // "keychains" contains the "keychain" keyword
        let catalog = Catalog::builtin();
        let results = filter("keychains", catalog.all());
        assert_eq!(ids(&results), vec![2, 3]);
    }

    #[test]
    fn test_title_match_without_keyword() {
        // "believe" appears only in the bell ornament title
        let catalog = Catalog::builtin();
        let results = filter("believe", catalog.all());
        assert_eq!(ids(&results), vec![5]);
    }

    #[test]
    fn test_first_term_drives_primary_pass() {
        // First term "christmas" matches; the second term never widens
        // the result when the primary pass already produced matches.
        let catalog = Catalog::builtin();
        let results = filter("christmas laptop", catalog.all());
        assert_eq!(ids(&results), vec![5, 8]);
    }

    #[test]
    fn test_fallback_pass_rescues_later_terms() {
        // "xyz" matches nothing, so the fallback pass tries every term
        // and "mouse" finds the gaming mouse.
        let catalog = Catalog::builtin();
        let results = filter("xyz mouse", catalog.all());
        assert_eq!(ids(&results), vec![11]);
        assert!(titles(&results)[0].starts_with("Gaming Mouse"));
    }

    #[test]
    fn test_fallback_unions_all_matching_terms() {
        let catalog = Catalog::builtin();
        let results = filter("zzz headphones chair", catalog.all());
        assert_eq!(ids(&results), vec![4, 10]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = Catalog::builtin();
        let results = filter("quux", catalog.all());
        assert!(results.is_empty());
        let results = filter("quux frobnicate", catalog.all());
        assert!(results.is_empty());
    }

    #[test]
    fn test_results_preserve_catalog_order() {
        let catalog = Catalog::builtin();
        // "selfckf" keyword hits products 2, 3, 5, 8 in catalog order
        let results = filter("selfckf", catalog.all());
        assert_eq!(ids(&results), vec![2, 3, 5, 8]);
    }

    #[test]
    fn test_duplicate_products_stay_distinct() {
        // Products 2 and 3 share a title; both appear, never deduplicated
        let catalog = Catalog::builtin();
        let results = filter("acrylic", catalog.all());
        assert!(ids(&results).contains(&2));
        assert!(ids(&results).contains(&3));
    }

    #[test]
    fn test_matchers_directly() {
        let catalog = Catalog::builtin();
        let mouse = catalog.all().last().unwrap();

        let primary = FirstTermMatcher::new("gaming");
        assert!(primary.matches(mouse));
        let primary = FirstTermMatcher::new("chair");
        assert!(!primary.matches(mouse));

        let terms = vec!["zzz".to_string(), "rgb".to_string()];
        let fallback = AnyTermMatcher::new(&terms);
        assert!(fallback.matches(mouse));
    }
}
