//! In-memory cart state
//!
//! Every mutator reports whether the list actually changed so the owner knows
//! when a save is due. Unknown ids are never an error, the call is a no-op.
use super::item::CartLineItem;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    /// Units across all lines, what the cart badge shows. Saturates at
    /// `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Merges into an existing line with the same id by summing quantities,
    /// otherwise appends. Quantities are taken as given.
    pub fn add(&mut self, item: CartLineItem) -> bool {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
        true
    }

    pub fn increase_quantity(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Drops the quantity by one. A line that would reach zero is removed.
    pub fn decrease_quantity(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|line| line.id == id) else {
            return false;
        };
        match self.items.get_mut(index) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.items.remove(index);
            }
        }
        true
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    /// Empties the cart and hands back what was in it.
    pub fn take(&mut self) -> Vec<CartLineItem> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: &str, qty: i64) -> CartLineItem {
        CartLineItem::new(id, id.to_uppercase(), Decimal::from(3)).set_quantity(qty)
    }

    #[test]
    fn add_merges_same_id() {
        let mut cart = Cart::new();
        cart.add(item("a", 2));
        cart.add(item("a", 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a").map(|line| line.quantity), Some(5));
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item("b", 1));
        cart.add(item("a", 1));
        cart.add(item("b", 1));

        let ids: Vec<_> = cart.items().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn add_accepts_zero_quantity_as_is() {
        let mut cart = Cart::new();
        cart.add(item("a", 0));

        assert_eq!(cart.get("a").map(|line| line.quantity), Some(0));
    }

    #[test]
    fn increase_unknown_id_is_noop() {
        let mut cart = Cart::from_items(vec![item("a", 1)]);

        assert!(!cart.increase_quantity("zzz"));
        assert!(cart.increase_quantity("a"));
        assert_eq!(cart.get("a").map(|line| line.quantity), Some(2));
    }

    #[test]
    fn decrease_to_zero_removes_line() {
        let mut cart = Cart::from_items(vec![item("a", 2), item("b", 1)]);

        assert!(cart.decrease_quantity("a"));
        assert_eq!(cart.get("a").map(|line| line.quantity), Some(1));

        assert!(cart.decrease_quantity("a"));
        assert!(cart.get("a").is_none());

        assert!(!cart.decrease_quantity("a"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_reports_change() {
        let mut cart = Cart::from_items(vec![item("a", 4)]);

        assert!(!cart.remove_item("b"));
        assert!(cart.remove_item("a"));
        assert!(cart.is_empty());
    }

    #[test]
    fn item_count_saturates() {
        let cart = Cart::from_items(vec![item("a", i64::MAX), item("b", 2)]);

        assert_eq!(cart.item_count(), i64::MAX);
    }

    #[test]
    fn take_empties_cart() {
        let mut cart = Cart::from_items(vec![item("a", 2), item("b", 3)]);
        assert_eq!(cart.item_count(), 5);

        let taken = cart.take();
        assert_eq!(taken.len(), 2);
        assert!(cart.is_empty());
    }
}
