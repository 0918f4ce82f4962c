//! Cart contents and their pure transition functions.

use crate::ids::ProductId;
use crate::money::Money;
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// One product entry in the cart together with its requested quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product identifier; unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image shown in the cart overlay.
    pub image_url: Option<String>,
    /// Requested quantity, always at least 1.
    pub amount: u32,
}

impl CartLine {
    /// First line for a product: quantity 1.
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            amount: 1,
        }
    }

    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.price.multiply(self.amount as i64)
    }
}

/// Ordered cart contents.
///
/// Lines are keyed by product id (unique within the sequence) and kept in
/// insertion order, which is also the display order. Transition functions
/// return a new value and leave the previous one untouched, so an observer
/// holding a snapshot never sees a partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart with `product` appended as a new line at amount 1.
    ///
    /// Re-adding a product already in the cart returns the cart unchanged;
    /// quantity changes go through [`Cart::increased`].
    pub fn added(&self, product: &Product) -> Cart {
        if self.contains(product.id) {
            return self.clone();
        }
        let mut lines = self.lines.clone();
        lines.push(CartLine::from_product(product));
        Cart { lines }
    }

    /// Cart with the matching line's amount raised by one.
    ///
    /// No-op when no line matches.
    pub fn increased(&self, id: ProductId) -> Cart {
        self.stepped(id, 1)
    }

    /// Cart with the matching line's amount lowered by one; the line is
    /// dropped entirely when its amount would reach zero.
    ///
    /// No-op when no line matches.
    pub fn decreased(&self, id: ProductId) -> Cart {
        self.stepped(id, -1)
    }

    /// Cart without the matching line, regardless of its amount.
    ///
    /// No-op when no line matches.
    pub fn removed(&self, id: ProductId) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|line| line.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Rebuild with one line's amount stepped, dropping it at zero.
    fn stepped(&self, id: ProductId, step: i64) -> Cart {
        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if line.id != id {
                    return Some(line.clone());
                }
                let amount = line.amount as i64 + step;
                if amount > 0 {
                    Some(CartLine {
                        amount: amount as u32,
                        ..line.clone()
                    })
                } else {
                    None
                }
            })
            .collect();
        Cart { lines }
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Whether a line for `id` exists.
    pub fn contains(&self, id: ProductId) -> bool {
        self.lines.iter().any(|line| line.id == id)
    }

    /// Total item count (sum of amounts).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.amount).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line subtotals, recomputed on demand.
    ///
    /// An empty cart totals zero in the default currency; otherwise the
    /// currency is the one the catalog priced the lines in.
    pub fn total_price(&self) -> Money {
        let currency = self
            .lines
            .first()
            .map(|line| line.price.currency)
            .unwrap_or_default();
        let cents = self.lines.iter().map(|line| line.subtotal().amount_cents).sum();
        Money::new(cents, currency)
    }
}
