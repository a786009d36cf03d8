//! Catalog item type.

use crate::catalog::Category;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A sellable item in one of the storefront catalogs.
///
/// Catalog items are static data; the cart snapshots what it needs at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique identifier within its catalog.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Emoji icon.
    pub emoji: String,
    /// Short description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Accent color (hex).
    pub color: String,
    /// Menu category, if any.
    pub category: Option<Category>,
}

impl CatalogItem {
    /// Create a new catalog item.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        emoji: impl Into<String>,
        price: Money,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            description: None,
            price,
            color: color.into(),
            category: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Price formatted for display.
    pub fn price_display(&self) -> String {
        self.price.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = CatalogItem::new("kiwi-kick", "Kiwi Kick", "\u{1f95d}", Money::new(3700), "#9ACD32")
            .with_category(Category::Detox)
            .with_description("Kiwi con lim\u{f3}n y menta fresca.");

        assert_eq!(item.id.as_str(), "kiwi-kick");
        assert_eq!(item.category, Some(Category::Detox));
        assert_eq!(item.price_display(), "\u{20a1}3,700");
        assert!(item.description.is_some());
    }
}
