//! The session-scoped cart state container.

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::money::Money;
use crate::product::Product;
use loja_storage::{KeyValueStore, Storage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Namespace key the persisted cart record lives under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&Cart)>;

/// Persisted record layout: `{ "cart": [ ...lines ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CartRecord {
    cart: Cart,
}

/// The cart state container.
///
/// Owns the cart sequence exclusively; UI collaborators mutate it only
/// through the operations below and read it through snapshots. Every
/// mutation persists the new state under its storage key and then invokes
/// each subscriber synchronously with the new snapshot. Instantiate one
/// per application session.
///
/// # Example
///
/// ```rust,ignore
/// use loja_cart::prelude::*;
/// use loja_storage::FileStore;
///
/// let mut store = CartStore::open(Box::new(FileStore::open(".loja")?));
/// store.add_to_cart(&product);
/// store.increase_amount(product.id);
/// println!("{}", store.total_price());
/// ```
pub struct CartStore {
    cart: Cart,
    storage: Storage,
    storage_key: String,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl CartStore {
    /// Open a store over `store`, restoring the cart persisted under
    /// [`CART_STORAGE_KEY`] if a record exists.
    ///
    /// A missing or unreadable record yields an empty cart.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_storage_key(store, CART_STORAGE_KEY)
    }

    /// Open a store persisting under a custom key.
    ///
    /// Useful for test isolation and for several carts sharing one backing
    /// store.
    pub fn with_storage_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let storage = Storage::new(store);
        let storage_key = key.into();
        let cart = match storage.get::<CartRecord>(&storage_key) {
            Ok(Some(record)) => record.cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "failed to restore cart, starting empty");
                Cart::new()
            }
        };
        Self {
            cart,
            storage,
            storage_key,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Append `product` as a new line at amount 1.
    ///
    /// No-op for a product already in the cart; quantity changes go
    /// through [`CartStore::increase_amount`].
    pub fn add_to_cart(&mut self, product: &Product) {
        debug!(id = %product.id, "add_to_cart");
        self.transition(|cart| cart.added(product));
    }

    /// Raise the matching line's amount by one. No-op for unknown ids.
    pub fn increase_amount(&mut self, id: ProductId) {
        debug!(%id, "increase_amount");
        self.transition(|cart| cart.increased(id));
    }

    /// Lower the matching line's amount by one, removing the line when its
    /// amount would reach zero. No-op for unknown ids.
    pub fn decrease_amount(&mut self, id: ProductId) {
        debug!(%id, "decrease_amount");
        self.transition(|cart| cart.decreased(id));
    }

    /// Remove the matching line regardless of its amount. No-op for
    /// unknown ids.
    pub fn delete_item(&mut self, id: ProductId) {
        debug!(%id, "delete_item");
        self.transition(|cart| cart.removed(id));
    }

    /// Replace the cart with the empty cart.
    pub fn reset(&mut self) {
        debug!("reset");
        self.transition(|_| Cart::new());
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned snapshot of the current state.
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    /// Sum of line subtotals, recomputed on demand.
    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Register an observer, invoked with the new snapshot after every
    /// mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a previously registered observer.
    ///
    /// Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() < before
    }

    /// Apply a pure transition, then persist and notify.
    fn transition(&mut self, f: impl FnOnce(&Cart) -> Cart) {
        self.cart = f(&self.cart);
        self.persist();
        self.notify();
    }

    /// Write the current state under the storage key.
    ///
    /// On failure the in-memory state stays authoritative for the rest of
    /// the session; the error is logged, not surfaced.
    fn persist(&self) {
        let record = CartRecord {
            cart: self.cart.clone(),
        };
        if let Err(e) = self.storage.set(&self.storage_key, &record) {
            warn!(key = %self.storage_key, error = %e, "failed to persist cart");
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.cart);
        }
    }
}
