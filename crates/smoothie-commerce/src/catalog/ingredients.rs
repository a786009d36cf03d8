//! Build-your-own ingredient catalogs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::ids::IngredientId;
use crate::money::Money;

/// Which wizard step an ingredient belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    Base,
    Fruit,
    Addon,
}

impl IngredientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientKind::Base => "base",
            IngredientKind::Fruit => "fruit",
            IngredientKind::Addon => "addon",
        }
    }
}

/// A component of a custom smoothie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Unique identifier within its kind.
    pub id: IngredientId,
    /// Display name.
    pub name: String,
    /// Emoji icon.
    pub emoji: String,
    /// Price added to the build.
    pub price: Money,
    /// Base, fruit or add-on.
    pub kind: IngredientKind,
}

static BASES: Lazy<Vec<Ingredient>> = Lazy::new(|| {
    vec![
        ingredient(IngredientKind::Base, "water", "Agua de Coco", "🥥", 500),
        ingredient(IngredientKind::Base, "almond", "Leche de Almendras", "🥛", 600),
        ingredient(IngredientKind::Base, "yogurt", "Yogurt Griego", "🥄", 700),
        ingredient(IngredientKind::Base, "oat", "Leche de Avena", "🌾", 550),
    ]
});

static FRUITS: Lazy<Vec<Ingredient>> = Lazy::new(|| {
    vec![
        ingredient(IngredientKind::Fruit, "mango", "Mango", "🥭", 400),
        ingredient(IngredientKind::Fruit, "strawberry", "Fresa", "🍓", 450),
        ingredient(IngredientKind::Fruit, "banana", "Banano", "🍌", 300),
        ingredient(IngredientKind::Fruit, "pineapple", "Piña", "🍍", 350),
        ingredient(IngredientKind::Fruit, "blueberry", "Arándanos", "🫐", 500),
        ingredient(IngredientKind::Fruit, "kiwi", "Kiwi", "🥝", 400),
    ]
});

static ADDONS: Lazy<Vec<Ingredient>> = Lazy::new(|| {
    vec![
        ingredient(IngredientKind::Addon, "protein", "Proteína Whey", "💪", 800),
        ingredient(IngredientKind::Addon, "spinach", "Espinaca", "🥬", 300),
        ingredient(IngredientKind::Addon, "chia", "Semillas de Chía", "🌱", 400),
        ingredient(IngredientKind::Addon, "honey", "Miel Natural", "🍯", 350),
        ingredient(IngredientKind::Addon, "peanut", "Mantequilla de Maní", "🥜", 450),
        ingredient(IngredientKind::Addon, "ginger", "Jengibre", "🫚", 250),
    ]
});

fn ingredient(kind: IngredientKind, id: &str, name: &str, emoji: &str, price: i64) -> Ingredient {
    Ingredient {
        id: IngredientId::new(id),
        name: name.to_string(),
        emoji: emoji.to_string(),
        price: Money::new(price),
        kind,
    }
}

/// Ingredients offered for a wizard step.
pub fn ingredients(kind: IngredientKind) -> &'static [Ingredient] {
    match kind {
        IngredientKind::Base => &BASES,
        IngredientKind::Fruit => &FRUITS,
        IngredientKind::Addon => &ADDONS,
    }
}

/// Look up an ingredient of the given kind.
pub fn find_ingredient(kind: IngredientKind, id: &IngredientId) -> Option<&'static Ingredient> {
    ingredients(kind).iter().find(|i| &i.id == id)
}
