//! Navigation and page switching utilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    IndexCatalog,
    Prefix,
    Match,
    MultiMatch,
    Wildcard,
    Range,
    Fuzzy,
    Complex,
    Aggregations,
    VectorIndex,
    VectorSearch,
    HybridSearch,
    Upload,
    Config,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::IndexCatalog => "Index Catalog",
            Page::Prefix => "Prefix",
            Page::Match => "Match",
            Page::MultiMatch => "Multi Match",
            Page::Wildcard => "Wildcard",
            Page::Range => "Range",
            Page::Fuzzy => "Fuzzy",
            Page::Complex => "Complex",
            Page::Aggregations => "Aggregations",
            Page::VectorIndex => "Vector Index",
            Page::VectorSearch => "Vector Search",
            Page::HybridSearch => "Hybrid Search",
            Page::Upload => "Upload Product",
            Page::Config => "Config",
        }
    }

    /// One-line description shown on the home page.
    pub fn summary(&self) -> &'static str {
        match self {
            Page::Home => "Overview of the query types",
            Page::IndexCatalog => "Create or delete the product catalog index",
            Page::Prefix => "Suggestions for terms starting with what you type",
            Page::Match => "Full-text match with a minimum-should-match percentage",
            Page::MultiMatch => "One term across several boosted fields",
            Page::Wildcard => "Patterns with * and ? wildcards",
            Page::Range => "Filter products by price bounds",
            Page::Fuzzy => "Typo-tolerant matching",
            Page::Complex => "Combine free text with per-field filters",
            Page::Aggregations => "Catalog facets and price statistics",
            Page::VectorIndex => "Build or drop the vector embedding index",
            Page::VectorSearch => "Semantic search, on-disk vs in-memory",
            Page::HybridSearch => "Keyword plus vector, on-disk vs in-memory",
            Page::Upload => "Add a product with an image to the catalog",
            Page::Config => "Active configuration",
        }
    }

    pub fn all() -> &'static [Page] {
        &[
            Page::Home,
            Page::IndexCatalog,
            Page::Prefix,
            Page::Match,
            Page::MultiMatch,
            Page::Wildcard,
            Page::Range,
            Page::Fuzzy,
            Page::Complex,
            Page::Aggregations,
            Page::VectorIndex,
            Page::VectorSearch,
            Page::HybridSearch,
            Page::Upload,
            Page::Config,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Page> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> Page {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Page {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }

    /// Pages that fire the on-disk and in-memory legs side by side.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Page::VectorSearch | Page::HybridSearch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(Page::Config.next(), Page::Home);
        assert_eq!(Page::Home.previous(), Page::Config);
        assert_eq!(Page::Prefix.next(), Page::Match);
    }

    #[test]
    fn test_index_round_trip() {
        for page in Page::all() {
            assert_eq!(Page::from_index(page.index()), Some(*page));
        }
        assert_eq!(Page::from_index(99), None);
    }
}
