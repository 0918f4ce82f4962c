//! Cart state management for the Loja storefront.
//!
//! This crate provides the session-scoped shopping-cart core:
//!
//! - **Domain types**: read-only [`Product`] input, [`CartLine`],
//!   cents-based [`Money`]
//! - **State**: [`Cart`], an ordered line sequence with pure transition
//!   functions
//! - **Container**: [`CartStore`] with the mutation entry points, observer
//!   subscriptions, and transparent persistence across reloads
//!
//! # Example
//!
//! ```rust,ignore
//! use loja_cart::prelude::*;
//! use loja_storage::FileStore;
//!
//! let mut store = CartStore::open(Box::new(FileStore::open(".loja")?));
//!
//! let caneca = Product::new(1, "Caneca", Money::from_decimal(25.0, Currency::BRL));
//! store.add_to_cart(&caneca);
//! store.increase_amount(caneca.id);
//!
//! println!("Total: {}", store.total_price());
//! ```

pub mod cart;
pub mod ids;
pub mod money;
pub mod product;
pub mod store;

pub use cart::{Cart, CartLine};
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use product::Product;
pub use store::{CartStore, ListenerId, CART_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartLine};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
    pub use crate::product::Product;
    pub use crate::store::{CartStore, ListenerId, CART_STORAGE_KEY};
}
