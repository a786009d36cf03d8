//! Menu categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A menu category used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Cleansing, green and berry blends.
    Detox,
    /// Fruit-forward energy blends.
    Energy,
    /// Protein-rich blends.
    Protein,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Detox, Category::Energy, Category::Protein];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Detox => "detox",
            Category::Energy => "energy",
            Category::Protein => "protein",
        }
    }

    /// Label shown on the storefront.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Detox => "Detox",
            Category::Energy => "Energ\u{ed}a",
            Category::Protein => "Prote\u{ed}na",
        }
    }

    /// Parse either the code or the storefront label, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "detox" => Some(Category::Detox),
            "energy" | "energ\u{ed}a" | "energia" => Some(Category::Energy),
            "protein" | "prote\u{ed}na" | "proteina" => Some(Category::Protein),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Category selection for the menu listing ("Todos" or a single category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Show everything.
    #[default]
    All,
    /// Show a single category.
    Only(Category),
}

impl CategoryFilter {
    /// Check whether an item category passes the filter.
    pub fn matches(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(*wanted),
        }
    }

    /// Parse a filter; `all` / `todos` select everything.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Some(CategoryFilter::All),
            other => Category::from_str(other).map(CategoryFilter::Only),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Todos",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::from_str("Energ\u{ed}a"), Some(Category::Energy));
        assert_eq!(Category::from_str("PROTEIN"), Some(Category::Protein));
        assert_eq!(Category::from_str("smoothies"), None);
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(None));
        assert!(CategoryFilter::All.matches(Some(Category::Detox)));
        assert!(CategoryFilter::Only(Category::Detox).matches(Some(Category::Detox)));
        assert!(!CategoryFilter::Only(Category::Detox).matches(Some(Category::Energy)));
        assert!(!CategoryFilter::Only(Category::Detox).matches(None));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::from_str("Todos"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::from_str("detox"),
            Some(CategoryFilter::Only(Category::Detox))
        );
        assert_eq!(CategoryFilter::from_str("nope"), None);
    }
}
