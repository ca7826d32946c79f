//! Service layer API for cart and checkout operations
use super::cart::Cart;
use super::config::{DisplaySettings, Settings, StorageSettings};
use super::error::{CheckoutError, StoreError};
use super::history::{InsertionOrder, OrderHistory};
use super::item::CartLineItem;
use super::order::{Order, TimeStamp};
use super::pricing::{self, Voucher};
use super::store::KeyValueStore;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Owns the cart, the order history and the store they are persisted in.
///
/// Mutations are applied in memory first and then saved. A failed save is
/// logged and otherwise ignored: memory stays authoritative until the next
/// successful write.
pub struct CartService<S: KeyValueStore> {
    store: S,
    cart: Cart,
    history: OrderHistory,
    cart_key: String,
    order_history_key: String,
    date_format: String,
}

impl<S: KeyValueStore> CartService<S> {
    /// Opens with default keys and newest-first history.
    pub fn open(store: S) -> Self {
        Self::with_settings(store, &Settings::default())
    }

    pub fn with_settings(store: S, settings: &Settings) -> Self {
        let StorageSettings {
            cart_key,
            order_history_key,
            ..
        } = &settings.storage;
        let DisplaySettings { date_format, .. } = &settings.display;

        let items: Vec<CartLineItem> = load_list(&store, cart_key);
        let orders: Vec<Order> = load_list(&store, order_history_key);
        debug!(
            cart_items = items.len(),
            orders = orders.len(),
            "loaded cart state"
        );

        Self {
            cart: Cart::from_items(items),
            history: OrderHistory::from_orders(orders, settings.history.insertion_order),
            cart_key: cart_key.clone(),
            order_history_key: order_history_key.clone(),
            date_format: date_format.clone(),
            store,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }
    pub fn cart_items(&self) -> &[CartLineItem] {
        self.cart.items()
    }
    pub fn order_history(&self) -> &OrderHistory {
        &self.history
    }
    pub fn insertion_order(&self) -> InsertionOrder {
        self.history.insertion_order()
    }
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_to_cart(&mut self, item: CartLineItem) {
        debug!(id = %item.id, quantity = item.quantity, "add to cart");
        if self.cart.add(item) {
            self.sync_cart();
        }
    }

    pub fn increase_quantity(&mut self, id: &str) {
        if self.cart.increase_quantity(id) {
            debug!(id, "increased quantity");
            self.sync_cart();
        }
    }

    pub fn decrease_quantity(&mut self, id: &str) {
        if self.cart.decrease_quantity(id) {
            debug!(id, "decreased quantity");
            self.sync_cart();
        }
    }

    pub fn remove_item(&mut self, id: &str) {
        if self.cart.remove_item(id) {
            debug!(id, "removed item");
            self.sync_cart();
        }
    }

    /// Places an order for everything in the cart, stamped with the current
    /// time.
    pub fn checkout(&mut self, voucher: Option<&Voucher>) -> Result<Order, CheckoutError> {
        self.checkout_at(TimeStamp::new(), voucher)
    }

    /// Checkout against an explicit clock reading.
    ///
    /// An empty cart is refused before anything is touched. Otherwise the
    /// items are frozen into an [`Order`] with the discounted total, the
    /// order is recorded in the history, the cart is emptied and both lists
    /// are saved.
    pub fn checkout_at(
        &mut self,
        placed_at: TimeStamp<Utc>,
        voucher: Option<&Voucher>,
    ) -> Result<Order, CheckoutError> {
        if self.cart.is_empty() {
            warn!("checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let discount_percent = voucher.map_or(Decimal::ZERO, |v| v.discount_percent);
        let summary = pricing::summarize(self.cart.items(), discount_percent);
        let date = placed_at.format(&self.date_format);

        // build before taking the items so a failure leaves the cart intact
        let order = Order::place(
            self.cart.items().to_vec(),
            summary.total,
            voucher
                .map(|v| v.title.clone())
                .filter(|title| !title.is_empty()),
            &placed_at,
            date,
        )?;
        self.cart.take();
        self.history.add_order(order.clone());

        info!(
            order_id = order.id(),
            total = %order.total(),
            items = order.items().len(),
            "order placed"
        );

        self.sync_order_history();
        self.sync_cart();

        Ok(order)
    }

    pub fn clear_cart(&mut self) {
        self.cart.take();
        info!("cart cleared");
        if let Err(err) = self.store.remove(&self.cart_key) {
            error!(key = %self.cart_key, "Error clearing cart items: {err}");
        }
    }

    pub fn clear_order_history(&mut self) {
        self.history.clear();
        info!("order history cleared");
        if let Err(err) = self.store.remove(&self.order_history_key) {
            error!(key = %self.order_history_key, "Error clearing order history: {err}");
        }
    }

    /// Writes the whole cart under its key.
    pub fn save_cart(&self) -> Result<(), StoreError> {
        save_list(&self.store, &self.cart_key, self.cart.items())
    }

    /// Writes the whole order history under its key.
    pub fn save_order_history(&self) -> Result<(), StoreError> {
        save_list(&self.store, &self.order_history_key, self.history.orders())
    }

    fn sync_cart(&self) {
        if let Err(err) = self.save_cart() {
            error!(key = %self.cart_key, "Error saving cart items: {err}");
        }
    }

    fn sync_order_history(&self) {
        if let Err(err) = self.save_order_history() {
            error!(key = %self.order_history_key, "Error saving order history: {err}");
        }
    }
}

// unreadable or malformed data counts as "nothing stored"
fn load_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return vec![],
        Err(err) => {
            error!(key, "Failed to load from storage: {err}");
            return vec![];
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(key, "Stored value is malformed, starting empty: {err}");
        vec![]
    })
}

fn save_list<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items)?;
    store.save(key, &json)
}
