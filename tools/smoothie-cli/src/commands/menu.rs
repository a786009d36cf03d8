//! List the menu.

use anyhow::{Context as _, Result};
use serde::Serialize;
use smoothie_commerce::catalog::{menu, signature, CatalogItem, CategoryFilter, MenuListing};

use super::MenuArgs;
use crate::context::Context;
use crate::output::format_price;

#[derive(Serialize)]
struct MenuPage<'a> {
    filter: CategoryFilter,
    total: usize,
    has_more: bool,
    items: Vec<&'a CatalogItem>,
}

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    if args.signature {
        let items: Vec<&CatalogItem> = signature().iter().collect();
        if ctx.output.is_json() {
            ctx.output.json(&items);
        } else {
            ctx.output.header("Manosas");
            print_items(ctx, &items);
        }
        return Ok(());
    }

    let filter = match args.category.as_deref() {
        Some(name) => CategoryFilter::from_str(name)
            .with_context(|| format!("Unknown category: {}", name))?,
        None => CategoryFilter::All,
    };

    let items = menu();
    let mut listing = MenuListing::new(ctx.storefront_config().menu);
    listing.select(filter);
    for _ in 0..args.more {
        if !listing.has_more(items) {
            break;
        }
        listing.load_more(items);
    }

    let page = MenuPage {
        filter,
        total: listing.filtered(items).len(),
        has_more: listing.has_more(items),
        items: listing.visible(items),
    };

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!("Menú · {}", filter.display_name()));
    print_items(ctx, &page.items);

    ctx.output.info(&format!("Showing {} of {}", page.items.len(), page.total));
    if page.has_more {
        ctx.output.debug("Use --more to load more items");
    }

    Ok(())
}

fn print_items(ctx: &Context, items: &[&CatalogItem]) {
    for item in items {
        let category = item.category.map(|c| c.display_name()).unwrap_or("");
        let price = format_price(item.price, 8);
        ctx.output.table_row(
            &[item.emoji.as_str(), item.id.as_str(), item.name.as_str(), category, price.as_str()],
            &[2, 20, 20, 10, 8],
        );
        if let Some(ref description) = item.description {
            ctx.output.kv("", description);
        }
    }
}
