//! Subtotal, discount and total for a cart
//!
//! Everything is recomputed from the line items on each call. Amounts are
//! rounded to cents, half away from zero, and saturate at `Decimal::MAX`
//! rather than overflow.
use super::item::CartLineItem;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A named percentage discount picked from the voucher list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    pub title: String,
    pub discount_percent: Decimal, // 0 - 100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

impl Voucher {
    /// Out of range percentages are clamped to 0..=100.
    pub fn new(title: impl Into<String>, discount_percent: Decimal) -> Self {
        Self {
            title: title.into(),
            discount_percent: discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        }
    }
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn extended_price(item: &CartLineItem) -> Decimal {
    item.price.saturating_mul(Decimal::from(item.quantity))
}

pub fn line_total(item: &CartLineItem) -> Decimal {
    round_cents(extended_price(item))
}

pub fn subtotal(items: &[CartLineItem]) -> Decimal {
    round_cents(
        items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(extended_price(item))),
    )
}

pub fn discount_amount(subtotal: Decimal, discount_percent: Decimal) -> Decimal {
    // the rate is at most 1, so scaling it first keeps the product in range
    round_cents(subtotal.saturating_mul(discount_percent / Decimal::ONE_HUNDRED))
}

pub fn summarize(items: &[CartLineItem], discount_percent: Decimal) -> OrderSummary {
    let subtotal = subtotal(items);
    let discount_amount = discount_amount(subtotal, discount_percent);

    OrderSummary {
        subtotal,
        discount_percent,
        discount_amount,
        total: round_cents(subtotal.saturating_sub(discount_amount)),
    }
}
