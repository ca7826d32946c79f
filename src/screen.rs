//! Order screen presentation model
//!
//! Holds what the order screen owns itself (the selected voucher) and turns
//! service state into display values. Rendering is left to the caller.
use super::config::DisplaySettings;
use super::error::CheckoutError;
use super::item::CartLineItem;
use super::order::Order;
use super::pricing::{self, OrderSummary, Voucher};
use super::service::CartService;
use super::store::KeyValueStore;
use rust_decimal::Decimal;

/// A dialog shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
    pub fn empty_cart() -> Self {
        Self::new("Cart Empty", "Your cart is empty. Add items before checkout.")
    }
    pub fn order_placed() -> Self {
        Self::new("Success", "Order placed successfully!")
    }
    pub fn congratulations() -> Self {
        Self::new(
            "Congratulations!!",
            "Your order has been placed successfully!",
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Voucher,
    OrderHistory,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order: Order,
    // cart level confirmation, then the screen's own dialog
    pub confirmation: Notice,
    pub notice: Notice,
    // navigation is reset to this single route
    pub reset_to: Route,
}

#[derive(Debug, Default)]
pub struct OrderScreen {
    voucher: Option<Voucher>,
    display: DisplaySettings,
}

impl OrderScreen {
    pub fn new(display: DisplaySettings) -> Self {
        Self {
            voucher: None,
            display,
        }
    }

    pub fn apply_voucher(&mut self, voucher: Voucher) {
        self.voucher = Some(voucher);
    }
    pub fn clear_voucher(&mut self) {
        self.voucher = None;
    }
    pub fn selected_voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }
    pub fn discount_percent(&self) -> Decimal {
        self.voucher
            .as_ref()
            .map_or(Decimal::ZERO, |voucher| voucher.discount_percent)
    }

    /// Where "Apply promocode" sends the user.
    pub fn apply_promocode(&self) -> Route {
        Route::Voucher
    }

    pub fn back_target(&self, can_go_back: bool) -> Option<Route> {
        if can_go_back { None } else { Some(Route::Home) }
    }

    pub fn summary(&self, items: &[CartLineItem]) -> OrderSummary {
        pricing::summarize(items, self.discount_percent())
    }

    pub fn line_total(&self, item: &CartLineItem) -> Decimal {
        pricing::line_total(item)
    }

    pub fn badge_count<S: KeyValueStore>(&self, service: &CartService<S>) -> i64 {
        service.cart().item_count()
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{}{:.2}",
            self.display.currency_symbol,
            pricing::round_cents(amount)
        )
    }

    /// Size label as shown under an item name.
    pub fn size_label(&self, item: &CartLineItem) -> String {
        match &item.size {
            Some(size) => format!("Size: {size} OZ"),
            None => "Size: N/A".to_string(),
        }
    }

    /// Checks out with the selected voucher. The voucher is only reset when
    /// the order goes through.
    pub fn checkout<S: KeyValueStore>(
        &mut self,
        service: &mut CartService<S>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let order = service.checkout(self.voucher.as_ref())?;
        self.voucher = None;

        Ok(CheckoutReceipt {
            order,
            confirmation: Notice::order_placed(),
            notice: Notice::congratulations(),
            reset_to: Route::OrderHistory,
        })
    }
}
