//! Product catalog module.
//!
//! Contains the static menus, build-your-own ingredients, categories and the
//! menu listing state.

mod category;
mod ingredients;
mod item;
mod listing;
mod menu;

pub use category::{Category, CategoryFilter};
pub use ingredients::{find_ingredient, ingredients, Ingredient, IngredientKind};
pub use item::CatalogItem;
pub use listing::MenuListing;
pub use menu::{find_item, menu, signature};
