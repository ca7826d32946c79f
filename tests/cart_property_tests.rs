//! Property-based tests for cart mutations and persistence
//!
//! Sequences of cart operations are generated with proptest and replayed
//! against a `CartService` over an in-memory store. The properties are the
//! ones the rest of the app leans on: quantities stay positive, merges sum,
//! and a reload reproduces whatever was last written.

use cart_checkout::{item::CartLineItem, service::CartService, store::MemoryStore};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum CartOp {
    Add { id: String, quantity: i64, cents: i64 },
    Increase(String),
    Decrease(String),
    Remove(String),
    Checkout,
}

/// A small id pool so operations keep hitting the same lines
fn id_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["latte", "mocha", "bagel", "tea"]).prop_map(str::to_string)
}

fn op_strategy() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        3 => (id_strategy(), 1..=5i64, 0..2_000i64)
            .prop_map(|(id, quantity, cents)| CartOp::Add { id, quantity, cents }),
        2 => id_strategy().prop_map(CartOp::Increase),
        2 => id_strategy().prop_map(CartOp::Decrease),
        1 => id_strategy().prop_map(CartOp::Remove),
        1 => Just(CartOp::Checkout),
    ]
}

fn apply(service: &mut CartService<MemoryStore>, op: CartOp) {
    match op {
        CartOp::Add { id, quantity, cents } => service.add_to_cart(
            CartLineItem::new(id.clone(), id, Decimal::new(cents, 2)).set_quantity(quantity),
        ),
        CartOp::Increase(id) => service.increase_quantity(&id),
        CartOp::Decrease(id) => service.decrease_quantity(&id),
        CartOp::Remove(id) => service.remove_item(&id),
        CartOp::Checkout => {
            let _ = service.checkout(None);
        }
    }
}

// PROPERTY TESTS
proptest! {
    /// Property: after any sequence of operations every line has quantity >= 1
    #[test]
    fn prop_quantities_stay_positive(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut service = CartService::open(MemoryStore::new());

        for op in ops {
            apply(&mut service, op);
            for item in service.cart_items() {
                prop_assert!(item.quantity >= 1, "{} dropped to {}", item.id, item.quantity);
            }
        }
    }

    /// Property: ids stay unique within the cart
    #[test]
    fn prop_ids_are_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut service = CartService::open(MemoryStore::new());
        for op in ops {
            apply(&mut service, op);
        }

        let mut ids: Vec<_> = service.cart_items().iter().map(|i| i.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(before, ids.len());
    }

    /// Property: adding the same id twice yields one line with the summed quantity
    #[test]
    fn prop_add_merges(a in 1..100i64, b in 1..100i64) {
        let mut service = CartService::open(MemoryStore::new());
        service.add_to_cart(CartLineItem::new("a", "A", Decimal::ONE).set_quantity(a));
        service.add_to_cart(CartLineItem::new("a", "A", Decimal::ONE).set_quantity(b));

        prop_assert_eq!(service.cart_items().len(), 1);
        prop_assert_eq!(service.cart_items()[0].quantity, a + b);
    }

    /// Property: reloading from the store reproduces both lists exactly
    #[test]
    fn prop_reload_matches_memory(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let store = MemoryStore::new();
        let mut service = CartService::open(store.clone());
        for op in ops {
            apply(&mut service, op);
        }

        let reloaded = CartService::open(store);

        prop_assert_eq!(reloaded.cart_items(), service.cart_items());
        prop_assert_eq!(reloaded.order_history().orders(), service.order_history().orders());
    }

    /// Property: with writes failing part-way, a reload shows the state as of
    /// the last successful write
    #[test]
    fn prop_reload_after_write_failure(
        before in prop::collection::vec(op_strategy(), 0..20),
        after in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let store = MemoryStore::new();
        let mut service = CartService::open(store.clone());
        for op in before {
            apply(&mut service, op);
        }
        // force a write so the snapshot below is what storage holds
        service.save_cart().unwrap();
        service.save_order_history().unwrap();
        let cart = service.cart_items().to_vec();
        let orders = service.order_history().orders().to_vec();

        store.set_fail_writes(true);
        for op in after {
            apply(&mut service, op);
        }
        store.set_fail_writes(false);

        let reloaded = CartService::open(store);
        prop_assert_eq!(reloaded.cart_items(), cart.as_slice());
        prop_assert_eq!(reloaded.order_history().orders(), orders.as_slice());
    }
}
