//! Storefront session state.
//!
//! [`Storefront`] owns everything one shopper touches: the cart, the
//! build-your-own wizard, the menu listing, the checkout in progress and the
//! notices waiting to be shown. Presentation code holds one per session and
//! passes it where it is needed.

use crate::builder::SmoothieBuilder;
use crate::cart::{Cart, OrderTotals};
use crate::catalog::{find_item, CatalogItem, MenuListing};
use crate::checkout::{CheckoutFlow, CheckoutStage, PaymentProcessor, Receipt};
use crate::config::StorefrontConfig;
use crate::error::{CheckoutError, CommerceError};
use crate::ids::ItemId;
use crate::notice::Notice;
use tracing::{debug, info, warn};

/// One shopper's storefront state.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    cart: Cart,
    builder: SmoothieBuilder,
    listing: MenuListing,
    checkout: Option<CheckoutFlow>,
    notices: Vec<Notice>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(StorefrontConfig::default())
    }
}

impl Storefront {
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            builder: SmoothieBuilder::new(config.builder),
            listing: MenuListing::new(config.menu),
            cart: Cart::new(),
            checkout: None,
            notices: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Direct cart access for quantity edits and removals.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Cart totals under the configured shipping policy.
    pub fn totals(&self) -> OrderTotals {
        self.cart.totals(&self.config.shipping)
    }

    pub fn builder(&self) -> &SmoothieBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut SmoothieBuilder {
        &mut self.builder
    }

    pub fn listing(&self) -> &MenuListing {
        &self.listing
    }

    pub fn listing_mut(&mut self) -> &mut MenuListing {
        &mut self.listing
    }

    /// Add a menu or signature item and announce it.
    pub fn add_to_cart(&mut self, item: &CatalogItem) {
        self.cart.add_item(item);
        self.notices.push(Notice::success(
            "¡Agregado al carrito!",
            format!("{} se agregó correctamente.", item.name),
        ));
    }

    /// Add a menu or signature item by id.
    pub fn add_by_id(&mut self, id: &ItemId) -> Result<(), CommerceError> {
        let item = find_item(id).ok_or_else(|| CommerceError::ItemNotFound(id.to_string()))?;
        self.add_to_cart(item);
        Ok(())
    }

    /// Turn the current custom build into a cart line and open the cart.
    ///
    /// The wizard resets either way. A missing base or fruit leaves the cart
    /// untouched and raises an error notice.
    pub fn add_custom_build(&mut self) -> Result<CatalogItem, CommerceError> {
        match self.builder.finalize() {
            Ok(item) => {
                self.cart.add_item(&item);
                self.cart.open();
                self.notices.push(Notice::success(
                    "¡Smoothie personalizado agregado!",
                    "Tu creación está en el carrito.",
                ));
                Ok(item)
            }
            Err(e) => {
                warn!(error = %e, "custom build rejected");
                self.notices.push(Notice::error(
                    "¡Falta algo!",
                    "Selecciona una base y al menos una fruta.",
                ));
                Err(e.into())
            }
        }
    }

    /// Leave the cart for checkout. A fresh flow always starts at Info.
    pub fn begin_checkout(&mut self) -> Result<&mut CheckoutFlow, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        if self.checkout.is_some() {
            return Err(CommerceError::CheckoutInProgress);
        }
        info!(
            items = self.cart.item_count(),
            subtotal = self.cart.subtotal().amount,
            "checkout started"
        );
        Ok(self
            .checkout
            .insert(CheckoutFlow::new(self.config.shipping)))
    }

    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutFlow> {
        self.checkout.as_mut()
    }

    /// Return from the Info stage to the cart, discarding the checkout.
    pub fn cancel_checkout(&mut self) -> Result<(), CommerceError> {
        let checkout = self
            .checkout
            .as_ref()
            .ok_or(CommerceError::CheckoutNotStarted)?;
        if !checkout.can_cancel() {
            return Err(CheckoutError::InvalidTransition {
                stage: checkout.stage(),
                action: "cancel checkout",
            }
            .into());
        }
        self.checkout = None;
        debug!("checkout cancelled");
        Ok(())
    }

    /// Charge the order through `processor`.
    ///
    /// On approval the checkout moves to Confirmation and a celebration
    /// notice is queued.
    pub async fn submit_payment<P>(&mut self, processor: &P) -> Result<&Receipt, CommerceError>
    where
        P: PaymentProcessor + ?Sized,
    {
        let checkout = self
            .checkout
            .as_mut()
            .ok_or(CommerceError::CheckoutNotStarted)?;

        match checkout.submit_payment(&self.cart, processor).await {
            Ok(receipt) => {
                self.notices
                    .push(Notice::celebrate("¡Pedido Confirmado!", receipt.greeting()));
                Ok(receipt)
            }
            Err(CheckoutError::EmptyCart) => Err(CommerceError::EmptyCart),
            Err(e) => {
                if let CheckoutError::PaymentFailed(failure) = &e {
                    self.notices
                        .push(Notice::error("Pago rechazado", failure.to_string()));
                }
                Err(e.into())
            }
        }
    }

    /// Close a confirmed checkout and return to browsing.
    ///
    /// Clears the cart, closes the cart panel and drops the checkout.
    pub fn finalize_checkout(&mut self) -> Result<Receipt, CommerceError> {
        let checkout = self
            .checkout
            .as_ref()
            .ok_or(CommerceError::CheckoutNotStarted)?;
        let receipt = match checkout.receipt() {
            Some(receipt) => receipt.clone(),
            None => {
                return Err(CheckoutError::InvalidTransition {
                    stage: checkout.stage(),
                    action: "finalize",
                }
                .into())
            }
        };

        self.cart.clear();
        self.cart.close();
        self.checkout = None;
        info!(order_id = %receipt.order_id, "checkout finalized");
        Ok(receipt)
    }

    /// Current checkout stage, if a checkout is open.
    pub fn checkout_stage(&self) -> Option<CheckoutStage> {
        self.checkout.as_ref().map(CheckoutFlow::stage)
    }

    /// Notices queued since the last call.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
