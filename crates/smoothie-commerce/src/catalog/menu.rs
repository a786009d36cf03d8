//! Static storefront catalogs: the full menu and the signature line.

use once_cell::sync::Lazy;

use crate::catalog::{CatalogItem, Category};
use crate::ids::ItemId;
use crate::money::Money;

static MENU: Lazy<Vec<CatalogItem>> = Lazy::new(|| {
    vec![
        item("mango-madness", "Mango Madness", "🥭", 3800, "#FFB347", Category::Energy,
            "Mango fresco con yogurt griego y miel."),
        item("berry-blast", "Berry Blast", "🍓", 4200, "#DC143C", Category::Detox,
            "Mix de fresas, frambuesas y arándanos."),
        item("coco-paradise", "Coco Paradise", "🥥", 3500, "#D2691E", Category::Protein,
            "Agua de coco, piña y leche de coco."),
        item("pineapple-dream", "Pineapple Dream", "🍍", 3600, "#FFD700", Category::Detox,
            "Piña tropical con espinaca baby."),
        item("strawberry-sunrise", "Strawberry Sunrise", "🌅", 3900, "#FF6347", Category::Energy,
            "Fresas con naranja y zanahoria."),
        item("kiwi-kick", "Kiwi Kick", "🥝", 3700, "#9ACD32", Category::Detox,
            "Kiwi con limón y menta fresca."),
        item("banana-boost", "Banana Boost", "🍌", 4000, "#FFE135", Category::Protein,
            "Banano con mantequilla de maní y avena."),
        item("watermelon-wave", "Watermelon Wave", "🍉", 3400, "#FF6B6B", Category::Detox,
            "Sandía refrescante con menta y limón."),
        item("passion-punch", "Passion Punch", "💜", 4100, "#9370DB", Category::Energy,
            "Maracuyá con guayaba y naranja."),
    ]
});

static SIGNATURE: Lazy<Vec<CatalogItem>> = Lazy::new(|| {
    vec![
        item("green-goddess", "Green Goddess", "🥬", 4500, "#4CAF50", Category::Detox,
            "Espinaca, manzana verde, pepino y jengibre. El detox perfecto."),
        item("purple-power", "Purple Power", "🍇", 5200, "#9C27B0", Category::Energy,
            "Uvas, arándanos, açaí y leche de almendras. Antioxidantes al máximo."),
        item("tropical-thunder", "Tropical Thunder", "⚡", 4800, "#FF6B35", Category::Energy,
            "Mango, maracuyá, naranja y cúrcuma. Explosión de energía tropical."),
    ]
});

fn item(
    id: &str,
    name: &str,
    emoji: &str,
    price: i64,
    color: &str,
    category: Category,
    description: &str,
) -> CatalogItem {
    CatalogItem::new(id, name, emoji, Money::new(price), color)
        .with_category(category)
        .with_description(description)
}

/// The full menu, in display order.
pub fn menu() -> &'static [CatalogItem] {
    &MENU
}

/// The signature ("manosas") smoothies.
pub fn signature() -> &'static [CatalogItem] {
    &SIGNATURE
}

/// Look up an item in the menu or the signature line.
pub fn find_item(id: &ItemId) -> Option<&'static CatalogItem> {
    MENU.iter().chain(SIGNATURE.iter()).find(|item| &item.id == id)
}
