//! Order history container
use super::order::Order;
use serde::{Deserialize, Serialize};

/// Where a newly placed order goes in the history list.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderHistory {
    orders: Vec<Order>,
    insertion: InsertionOrder,
}

impl OrderHistory {
    pub fn new(insertion: InsertionOrder) -> Self {
        Self {
            orders: vec![],
            insertion,
        }
    }
    pub fn from_orders(orders: Vec<Order>, insertion: InsertionOrder) -> Self {
        Self { orders, insertion }
    }
    pub fn add_order(&mut self, order: Order) {
        match self.insertion {
            InsertionOrder::NewestFirst => self.orders.insert(0, order),
            InsertionOrder::OldestFirst => self.orders.push(order),
        }
    }
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
    /// The most recently placed order, whichever end it lives at.
    pub fn latest(&self) -> Option<&Order> {
        match self.insertion {
            InsertionOrder::NewestFirst => self.orders.first(),
            InsertionOrder::OldestFirst => self.orders.last(),
        }
    }
    pub fn insertion_order(&self) -> InsertionOrder {
        self.insertion
    }
    pub fn len(&self) -> usize {
        self.orders.len()
    }
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
    pub fn clear(&mut self) {
        self.orders.clear();
    }
}
