//! Cart line items
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product (or product + size variant) sitting in the cart.
///
/// The shape matches what is written to storage, so field names are kept
/// short and optional fields are omitted when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub id: String, // unique within a cart
    pub name: String,
    #[serde(default)]
    pub image: String, // asset reference, opaque here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
    // only set once the item has been checked out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CartLineItem {
    /// A single unit of `id` at `price`. Use the setters for the rest.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            size: None,
            price,
            quantity: 1,
            date: None,
        }
    }
    pub fn set_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
    pub fn set_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
    pub fn set_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
    pub fn set_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}
