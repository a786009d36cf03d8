//! Commerce core for the smoothie storefront.
//!
//! This crate provides the state and rules behind the shop:
//!
//! - **Catalog**: Menu, signature line, build-your-own ingredients, menu paging
//! - **Cart**: Order lines, subtotal, shipping and grand total
//! - **Builder**: Three-step build-your-own wizard
//! - **Checkout**: Info → Payment → Confirmation state machine, simulated payment
//! - **Storefront**: Per-session container tying the above together
//!
//! # Example
//!
//! ```rust,no_run
//! use smoothie_commerce::prelude::*;
//!
//! # async fn run() -> Result<(), CommerceError> {
//! let mut store = Storefront::new(StorefrontConfig::default());
//!
//! let builder = store.builder_mut();
//! builder.select_base(&IngredientId::new("water"))?;
//! builder.toggle_fruit(&IngredientId::new("mango"))?;
//! builder.toggle_fruit(&IngredientId::new("strawberry"))?;
//! store.add_custom_build()?;
//!
//! let checkout = store.begin_checkout()?;
//! checkout.set_field(Field::Name, "Ana Solís")?;
//! checkout.set_field(Field::Email, "ana@example.cr")?;
//! checkout.set_field(Field::Phone, "8888-0000")?;
//! checkout.set_field(Field::Address, "Escazú centro")?;
//! checkout.submit_info()?;
//! checkout.select_payment_method(PaymentMethodKind::Sinpe)?;
//!
//! let processor = SimulatedProcessor::new(&store.config().payment);
//! let receipt = store.submit_payment(&processor).await?;
//! println!("Total: {}", receipt.totals.grand_total.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod config;

pub mod catalog;
pub mod cart;
pub mod builder;
pub mod checkout;
pub mod notice;
pub mod storefront;

pub use config::StorefrontConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::Money;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{BuilderConfig, MenuConfig, PaymentConfig, ShippingPolicy, StorefrontConfig};
    pub use crate::error::{BuilderError, CheckoutError, CommerceError, FieldError, PaymentError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        find_ingredient, find_item, ingredients, menu, signature, CatalogItem, Category,
        CategoryFilter, Ingredient, IngredientKind, MenuListing,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, OrderTotals};

    // Builder
    pub use crate::builder::{BuilderStep, SmoothieBuilder, Toggle};

    // Checkout
    pub use crate::checkout::{
        CashOption, CheckoutFlow, CheckoutStage, ContactInfo, Field, FieldErrors, PaymentMethod,
        PaymentMethodKind, PaymentProcessor, Receipt, SimulatedProcessor, Sleeper, TokioSleeper,
    };

    pub use crate::notice::{Notice, NoticeKind};
    pub use crate::storefront::Storefront;
}
