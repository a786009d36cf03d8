//! Menu listing state: category filter plus "load more" paging.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, CategoryFilter};
use crate::config::MenuConfig;

/// What the menu section currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuListing {
    filter: CategoryFilter,
    visible: usize,
    config: MenuConfig,
}

impl MenuListing {
    /// Create a listing showing all categories, first page only.
    pub fn new(config: MenuConfig) -> Self {
        Self {
            filter: CategoryFilter::All,
            visible: config.page_size,
            config,
        }
    }

    /// Active filter.
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Number of items the view may show.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Change the filter; paging restarts at the first page.
    pub fn select(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.visible = self.config.page_size;
    }

    /// Items passing the current filter.
    pub fn filtered<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        items
            .iter()
            .filter(|item| self.filter.matches(item.category))
            .collect()
    }

    /// Items on screen.
    pub fn visible<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        let mut filtered = self.filtered(items);
        filtered.truncate(self.visible);
        filtered
    }

    /// Reveal the next step of items, never past the filtered count.
    pub fn load_more(&mut self, items: &[CatalogItem]) {
        let total = self.filtered(items).len();
        self.visible = (self.visible + self.config.page_step).min(total);
    }

    /// Collapse back to the first page.
    pub fn show_less(&mut self) {
        self.visible = self.config.page_size;
    }

    /// Whether "load more" applies.
    pub fn has_more(&self, items: &[CatalogItem]) -> bool {
        self.visible < self.filtered(items).len()
    }

    /// Whether "show less" applies.
    pub fn can_collapse(&self) -> bool {
        self.visible > self.config.page_size
    }
}

impl Default for MenuListing {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{menu, Category};

    #[test]
    fn test_initial_page() {
        let listing = MenuListing::default();
        assert_eq!(listing.visible(menu()).len(), 6);
        assert!(listing.has_more(menu()));
        assert!(!listing.can_collapse());
    }

    #[test]
    fn test_load_more_caps_at_total() {
        let mut listing = MenuListing::default();
        listing.load_more(menu());
        assert_eq!(listing.visible_count(), 9);
        assert!(!listing.has_more(menu()));
        assert!(listing.can_collapse());

        listing.load_more(menu());
        assert_eq!(listing.visible_count(), 9);

        listing.show_less();
        assert_eq!(listing.visible_count(), 6);
    }

    #[test]
    fn test_category_filter_resets_paging() {
        let mut listing = MenuListing::default();
        listing.load_more(menu());
        listing.select(CategoryFilter::Only(Category::Detox));

        assert_eq!(listing.visible_count(), 6);
        let visible = listing.visible(menu());
        assert_eq!(visible.len(), 4);
        assert!(visible.iter().all(|i| i.category == Some(Category::Detox)));
        assert!(!listing.has_more(menu()));
    }
}
