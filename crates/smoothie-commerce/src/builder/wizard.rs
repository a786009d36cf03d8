//! Build-your-own wizard state machine.

use crate::catalog::{find_ingredient, CatalogItem, Ingredient, IngredientKind};
use crate::config::BuilderConfig;
use crate::error::BuilderError;
use crate::ids::{IngredientId, ItemId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Emoji shown for every custom build.
pub const CUSTOM_EMOJI: &str = "🎨";

/// Accent color shared by every custom build.
pub const CUSTOM_COLOR: &str = "#FDB927";

/// Steps in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuilderStep {
    /// Pick exactly one base.
    Base,
    /// Pick one to three fruits.
    Fruits,
    /// Pick any number of add-ons.
    Addons,
}

impl BuilderStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderStep::Base => "base",
            BuilderStep::Fruits => "fruits",
            BuilderStep::Addons => "addons",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuilderStep::Base => "Base",
            BuilderStep::Fruits => "Frutas",
            BuilderStep::Addons => "Add-ons",
        }
    }

    /// Get the step index (0-indexed).
    pub fn index(&self) -> u8 {
        match self {
            BuilderStep::Base => 0,
            BuilderStep::Fruits => 1,
            BuilderStep::Addons => 2,
        }
    }

    fn next(&self) -> Option<BuilderStep> {
        match self {
            BuilderStep::Base => Some(BuilderStep::Fruits),
            BuilderStep::Fruits => Some(BuilderStep::Addons),
            BuilderStep::Addons => None,
        }
    }

    fn previous(&self) -> Option<BuilderStep> {
        match self {
            BuilderStep::Base => None,
            BuilderStep::Fruits => Some(BuilderStep::Base),
            BuilderStep::Addons => Some(BuilderStep::Fruits),
        }
    }
}

/// Result of toggling a fruit or add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The ingredient is now selected.
    Added,
    /// The ingredient was deselected.
    Removed,
    /// The fruit limit is reached; nothing changed.
    LimitReached,
}

/// Build-your-own wizard.
///
/// Selections survive moving back and forth between steps and are cleared by
/// [`SmoothieBuilder::finalize`], whether or not it succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmoothieBuilder {
    step: BuilderStep,
    base: Option<Ingredient>,
    fruits: Vec<Ingredient>,
    addons: Vec<Ingredient>,
    max_fruits: usize,
    /// Sequence for the next custom item id.
    next_sequence: u64,
}

impl SmoothieBuilder {
    /// Create a wizard at the first step with nothing selected.
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            step: BuilderStep::Base,
            base: None,
            fruits: Vec::new(),
            addons: Vec::new(),
            max_fruits: config.max_fruits,
            next_sequence: 1,
        }
    }

    /// Current step.
    pub fn step(&self) -> BuilderStep {
        self.step
    }

    /// Selected base.
    pub fn base(&self) -> Option<&Ingredient> {
        self.base.as_ref()
    }

    /// Selected fruits, in selection order.
    pub fn fruits(&self) -> &[Ingredient] {
        &self.fruits
    }

    /// Selected add-ons, in selection order.
    pub fn addons(&self) -> &[Ingredient] {
        &self.addons
    }

    /// Fruit limit.
    pub fn max_fruits(&self) -> usize {
        self.max_fruits
    }

    /// Whether an unselected fruit can still be picked.
    pub fn fruit_limit_reached(&self) -> bool {
        self.fruits.len() >= self.max_fruits
    }

    /// Choose the base, replacing any previous choice.
    pub fn select_base(&mut self, id: &IngredientId) -> Result<(), BuilderError> {
        let base = lookup(IngredientKind::Base, id)?;
        tracing::debug!(base = %base.id, "base selected");
        self.base = Some(base.clone());
        Ok(())
    }

    /// Add or remove a fruit. A new fruit beyond the limit is rejected.
    pub fn toggle_fruit(&mut self, id: &IngredientId) -> Result<Toggle, BuilderError> {
        let fruit = lookup(IngredientKind::Fruit, id)?;

        if let Some(pos) = self.fruits.iter().position(|f| f.id == fruit.id) {
            self.fruits.remove(pos);
            return Ok(Toggle::Removed);
        }

        if self.fruit_limit_reached() {
            tracing::debug!(fruit = %fruit.id, max = self.max_fruits, "fruit limit reached");
            return Ok(Toggle::LimitReached);
        }

        self.fruits.push(fruit.clone());
        Ok(Toggle::Added)
    }

    /// Add or remove an add-on.
    pub fn toggle_addon(&mut self, id: &IngredientId) -> Result<Toggle, BuilderError> {
        let addon = lookup(IngredientKind::Addon, id)?;

        if let Some(pos) = self.addons.iter().position(|a| a.id == addon.id) {
            self.addons.remove(pos);
            return Ok(Toggle::Removed);
        }

        self.addons.push(addon.clone());
        Ok(Toggle::Added)
    }

    /// Whether the current step's requirement is met.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            BuilderStep::Base => self.base.is_some(),
            BuilderStep::Fruits => !self.fruits.is_empty(),
            BuilderStep::Addons => true,
        }
    }

    /// Advance to the next step.
    pub fn next(&mut self) -> Result<BuilderStep, BuilderError> {
        let next = self.step.next().ok_or(BuilderError::AtLastStep)?;

        if !self.can_proceed() {
            return Err(BuilderError::StepIncomplete(self.step.as_str()));
        }

        self.step = next;
        Ok(next)
    }

    /// Go back one step, keeping all selections.
    pub fn back(&mut self) -> Result<BuilderStep, BuilderError> {
        let prev = self.step.previous().ok_or(BuilderError::AtFirstStep)?;
        self.step = prev;
        Ok(prev)
    }

    /// Live price: base + fruits + add-ons.
    pub fn price(&self) -> Money {
        self.base.iter().chain(&self.fruits).chain(&self.addons).map(|i| i.price).sum()
    }

    /// Turn the selection into a cart-ready item.
    ///
    /// Fails if no base or no fruit is selected. Either way the wizard is
    /// reset to the first step with nothing selected.
    pub fn finalize(&mut self) -> Result<CatalogItem, BuilderError> {
        let result = self.build_item();
        self.reset();
        if let Ok(item) = &result {
            self.next_sequence += 1;
            tracing::info!(item_id = %item.id, price = item.price.amount, "custom build finalized");
        }
        result
    }

    /// Clear every selection and return to the first step.
    pub fn reset(&mut self) {
        self.step = BuilderStep::Base;
        self.base = None;
        self.fruits.clear();
        self.addons.clear();
    }

    fn build_item(&self) -> Result<CatalogItem, BuilderError> {
        let base = self.base.as_ref().ok_or(BuilderError::IncompleteBuild)?;
        if self.fruits.is_empty() {
            return Err(BuilderError::IncompleteBuild);
        }

        let icons: String = self.fruits.iter().map(|f| f.emoji.as_str()).collect();
        let mut parts = vec![base.name.clone()];
        parts.push(names(&self.fruits));
        if !self.addons.is_empty() {
            parts.push(names(&self.addons));
        }

        Ok(CatalogItem::new(
            ItemId::custom(self.next_sequence),
            format!("Custom: {icons}"),
            CUSTOM_EMOJI,
            self.price(),
            CUSTOM_COLOR,
        )
        .with_description(parts.join(" + ")))
    }
}

impl Default for SmoothieBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

fn lookup(kind: IngredientKind, id: &IngredientId) -> Result<&'static Ingredient, BuilderError> {
    find_ingredient(kind, id).ok_or_else(|| BuilderError::UnknownIngredient {
        kind: kind.as_str(),
        id: id.to_string(),
    })
}

fn names(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
