//! Price a build-your-own smoothie.

use anyhow::{Context as _, Result};
use smoothie_commerce::builder::{SmoothieBuilder, Toggle};
use smoothie_commerce::catalog::{ingredients, IngredientKind};
use smoothie_commerce::IngredientId;

use super::BuildArgs;
use crate::context::Context;
use crate::output::{format_price, Output};

/// Run the build command.
pub async fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    if args.list {
        list_ingredients(ctx);
        return Ok(());
    }

    let base = args.base.as_deref().context("--base is required")?;
    let mut builder = SmoothieBuilder::new(ctx.storefront_config().builder);
    apply_selection(&mut builder, base, &args.fruits, &args.addons, &ctx.output)?;

    let preview = builder.price();
    let item = builder.finalize().context("Build is incomplete")?;

    if ctx.output.is_json() {
        ctx.output.json(&item);
        return Ok(());
    }

    ctx.output.header(&item.name);
    if let Some(ref description) = item.description {
        ctx.output.kv("recipe", description);
    }
    ctx.output.kv("price", &preview.display());
    ctx.output.success(&format!("{} {}", item.emoji, item.price.display()));

    Ok(())
}

/// Walk the wizard through base, fruits and add-ons.
///
/// Fruits past the limit are skipped with a warning, the way the storefront
/// ignores the extra tap.
pub fn apply_selection(
    builder: &mut SmoothieBuilder,
    base: &str,
    fruits: &[String],
    addons: &[String],
    output: &Output,
) -> Result<()> {
    builder.select_base(&IngredientId::new(base))?;
    builder.next().context("Choose a base")?;

    for fruit in fruits {
        if builder.toggle_fruit(&IngredientId::new(fruit.as_str()))? == Toggle::LimitReached {
            output.warn(&format!(
                "Skipping {}: at most {} fruits",
                fruit,
                builder.max_fruits()
            ));
        }
    }
    builder.next().context("Choose at least one fruit")?;

    for addon in addons {
        builder.toggle_addon(&IngredientId::new(addon.as_str()))?;
    }

    output.debug(&format!("{} so far", builder.price().display()));
    Ok(())
}

fn list_ingredients(ctx: &Context) {
    let kinds = [
        (IngredientKind::Base, "Bases"),
        (IngredientKind::Fruit, "Frutas"),
        (IngredientKind::Addon, "Extras"),
    ];

    if ctx.output.is_json() {
        let all: Vec<_> = kinds.iter().flat_map(|&(kind, _)| ingredients(kind)).collect();
        ctx.output.json(&all);
        return;
    }

    for (kind, title) in kinds {
        ctx.output.header(title);
        for ingredient in ingredients(kind) {
            let price = format_price(ingredient.price, 6);
            ctx.output.table_row(
                &[
                    ingredient.emoji.as_str(),
                    ingredient.id.as_str(),
                    ingredient.name.as_str(),
                    price.as_str(),
                ],
                &[2, 12, 14, 6],
            );
        }
    }
}
