//! Placed orders and checkout timestamps
use super::error::OrderIdError;
use super::item::CartLineItem;
use super::utils;
use chrono::{DateTime, Local, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct TimeStamp<T: TimeZone>(DateTime<T>);

impl TimeStamp<Utc> {
    pub fn new() -> Self {
        Self(Utc::now())
    }
    pub fn new_with(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
    /// Renders the stamp in the local timezone using a chrono format string.
    pub fn format(&self, fmt: &str) -> String {
        self.0.with_timezone(&Local).format(fmt).to_string()
    }
}

impl Default for TimeStamp<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeZone> From<DateTime<T>> for TimeStamp<T> {
    fn from(value: DateTime<T>) -> Self {
        TimeStamp(value)
    }
}

/// A completed checkout. Nothing mutates an order after it is placed, so the
/// fields are only reachable through accessors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    items: Vec<CartLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voucher: Option<String>,
    date: String,
}

impl Order {
    /// Freezes `items` into a new order. Every item is stamped with `date`.
    pub fn place(
        items: Vec<CartLineItem>,
        total: Decimal,
        voucher: Option<String>,
        placed_at: &TimeStamp<Utc>,
        date: String,
    ) -> Result<Self, OrderIdError> {
        let id = utils::new_order_id(placed_at)?;
        let items = items
            .into_iter()
            .map(|item| item.set_date(date.clone()))
            .collect();

        Ok(Self {
            id,
            items,
            total,
            voucher,
            date,
        })
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }
    pub fn total(&self) -> Decimal {
        self.total
    }
    pub fn voucher(&self) -> Option<&str> {
        self.voucher.as_deref()
    }
    pub fn date(&self) -> &str {
        &self.date
    }
    /// Number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }
}
