//! Client-held cart aggregate
//!
//! Single logical actor (the customer's active session), so no internal
//! locking. Every mutation recomputes the derived total and replaces the
//! durable line list through the [`CartStore`]; the total itself is never
//! persisted.

use std::collections::HashMap;

use shared::cart::{
    AddonSelection, CartLine, CartSnapshot, PersistedLine, VariantSelection, line_signature,
};
use shared::models::Product;
use shared::pricing;

use crate::error::{CartError, CartResult};
use crate::store::CartStore;

/// Customer cart: ordered lines plus a derived total
pub struct Cart<S: CartStore> {
    store: S,
    lines: Vec<CartLine>,
    /// Invariant: total == Σ line.unit_price × line.quantity, in cents
    total: i64,
}

impl<S: CartStore> Cart<S> {
    /// Rehydrate from the store, recomputing every unit price against the
    /// current catalog. The persisted format carries no prices or totals, so
    /// nothing stale can be read back. Lines whose product vanished or whose
    /// selections no longer validate are dropped with a warning.
    ///
    /// A fresh store yields an empty cart.
    pub fn load(store: S, catalog: &HashMap<String, Product>) -> CartResult<Self> {
        let persisted = store.load()?;
        let mut lines = Vec::with_capacity(persisted.len());

        for entry in persisted {
            let Some(product) = catalog.get(&entry.product_id) else {
                tracing::warn!(product_id = %entry.product_id, "Dropping cart line: unknown product");
                continue;
            };
            match pricing::unit_price(product, &entry.variants, &entry.addons) {
                Ok(unit_price) => lines.push(CartLine {
                    line_id: line_signature(&product.id, &entry.variants, &entry.addons),
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    category: product.category.clone(),
                    image: product.image.clone(),
                    unit_price,
                    quantity: entry.quantity.max(1),
                    variants: entry.variants,
                    addons: entry.addons,
                }),
                Err(issues) => {
                    tracing::warn!(
                        product_id = %entry.product_id,
                        issues = ?issues,
                        "Dropping cart line: selection no longer validates"
                    );
                }
            }
        }

        let total = derive_total(&lines);
        Ok(Self {
            store,
            lines,
            total,
        })
    }

    /// Add a line; merges into an existing line when the identity signature
    /// matches, otherwise appends preserving insertion order.
    pub fn add_line(
        &mut self,
        product: &Product,
        variants: VariantSelection,
        addons: AddonSelection,
        quantity: u32,
    ) -> CartResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        if !product.is_available {
            return Err(CartError::ProductUnavailable(product.id.clone()));
        }

        let unit_price = pricing::unit_price(product, &variants, &addons)
            .map_err(CartError::InvalidSelection)?;
        let line_id = line_signature(&product.id, &variants, &addons);

        match self.lines.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                line_id,
                product_id: product.id.clone(),
                name: product.name.clone(),
                category: product.category.clone(),
                image: product.image.clone(),
                unit_price,
                quantity,
                variants,
                addons,
            }),
        }

        self.commit()
    }

    /// Remove a line by id; unknown ids are a no-op
    pub fn remove_line(&mut self, line_id: &str) -> CartResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);
        if self.lines.len() == before {
            return Ok(());
        }
        self.commit()
    }

    /// Set a line's quantity. Quantities below 1 are a no-op: deleting a
    /// line goes through [`remove_line`](Self::remove_line), which keeps
    /// accidental zero-quantity ghost lines out of the cart.
    pub fn set_quantity(&mut self, line_id: &str, quantity: u32) -> CartResult<()> {
        if quantity < 1 {
            return Ok(());
        }
        let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) else {
            return Ok(());
        };
        if line.quantity == quantity {
            return Ok(());
        }
        line.quantity = quantity;
        self.commit()
    }

    /// Empty the cart
    pub fn clear(&mut self) -> CartResult<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        self.lines.clear();
        self.commit()
    }

    /// Immutable copy for the submission pipeline; later cart mutations do
    /// not affect it
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Derived total in cents
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Recompute the total and replace the persisted line list
    fn commit(&mut self) -> CartResult<()> {
        self.total = derive_total(&self.lines);
        let persisted: Vec<PersistedLine> = self
            .lines
            .iter()
            .map(|l| PersistedLine {
                product_id: l.product_id.clone(),
                variants: l.variants.clone(),
                addons: l.addons.clone(),
                quantity: l.quantity,
            })
            .collect();
        self.store.save(&persisted)?;
        Ok(())
    }
}

fn derive_total(lines: &[CartLine]) -> i64 {
    lines.iter().map(CartLine::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCartStore;
    use shared::models::{Addon, VariantGroup, VariantOption};

    fn silog(id: &str, base_price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: "Beef Silog".to_string(),
            description: "Garlic rice plate".to_string(),
            base_price,
            category: "Silog Meals".to_string(),
            image: None,
            is_available: true,
            variant_groups: vec![VariantGroup {
                name: "Flavor".to_string(),
                required: true,
                options: vec![
                    VariantOption {
                        name: "Beef".to_string(),
                        price_delta: 0,
                    },
                    VariantOption {
                        name: "Pork".to_string(),
                        price_delta: 0,
                    },
                ],
            }],
            addons: vec![Addon {
                name: "Egg".to_string(),
                price_delta: 1500,
                max_quantity: 3,
            }],
        }
    }

    fn beef() -> VariantSelection {
        [("Flavor".to_string(), "Beef".to_string())].into()
    }

    fn eggs(qty: u32) -> AddonSelection {
        [("Egg".to_string(), qty)].into()
    }

    fn empty_cart() -> Cart<MemoryCartStore> {
        Cart::load(MemoryCartStore::new(), &HashMap::new()).unwrap()
    }

    #[test]
    fn same_selection_merges_by_summing_quantity() {
        let mut cart = empty_cart();
        let product = silog("silog-1", 4500);

        cart.add_line(&product, beef(), eggs(2), 2).unwrap();
        cart.add_line(&product, beef(), eggs(2), 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn different_selection_creates_a_distinct_line() {
        let mut cart = empty_cart();
        let product = silog("silog-1", 4500);

        cart.add_line(&product, beef(), eggs(2), 1).unwrap();
        cart.add_line(&product, beef(), eggs(1), 1).unwrap();
        let pork: VariantSelection = [("Flavor".to_string(), "Pork".to_string())].into();
        cart.add_line(&product, pork, AddonSelection::new(), 1)
            .unwrap();

        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn total_tracks_every_mutation() {
        let mut cart = empty_cart();
        let a = silog("silog-1", 4500);
        let b = silog("silog-2", 6000);

        // 1 × (4500 + 2×1500) = 7500
        cart.add_line(&a, beef(), eggs(2), 1).unwrap();
        assert_eq!(cart.total(), 7500);

        cart.add_line(&b, beef(), AddonSelection::new(), 2).unwrap();
        assert_eq!(cart.total(), 7500 + 12000);

        let line_id = cart.lines()[1].line_id.clone();
        cart.set_quantity(&line_id, 1).unwrap();
        assert_eq!(cart.total(), 7500 + 6000);

        cart.remove_line(&line_id).unwrap();
        assert_eq!(cart.total(), 7500);

        let expected: i64 = cart.lines().iter().map(CartLine::line_total).sum();
        assert_eq!(cart.total(), expected);

        cart.clear().unwrap();
        assert_eq!(cart.total(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_below_one_is_a_no_op() {
        let mut cart = empty_cart();
        let product = silog("silog-1", 4500);
        cart.add_line(&product, beef(), AddonSelection::new(), 2)
            .unwrap();

        let line_id = cart.lines()[0].line_id.clone();
        cart.set_quantity(&line_id, 0).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn invalid_selection_is_rejected_and_cart_unchanged() {
        let mut cart = empty_cart();
        let product = silog("silog-1", 4500);

        let err = cart
            .add_line(&product, VariantSelection::new(), eggs(9), 1)
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidSelection(ref issues) if issues.len() == 2));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut cart = empty_cart();
        let product = silog("silog-1", 4500);
        cart.add_line(&product, beef(), eggs(2), 1).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total, 7500);

        cart.clear().unwrap();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.total, 7500);
    }

    #[test]
    fn rehydration_recomputes_prices_from_the_catalog() {
        let store = MemoryCartStore::new();
        let old_product = silog("silog-1", 4500);

        {
            let mut catalog = HashMap::new();
            catalog.insert(old_product.id.clone(), old_product.clone());
            let mut cart = Cart::load(store, &catalog).unwrap();
            cart.add_line(&old_product, beef(), eggs(2), 1).unwrap();
            assert_eq!(cart.total(), 7500);
        }

        // Price changed between sessions: the stored cart carries no prices,
        // so the reloaded cart reflects the new catalog
        let store = MemoryCartStore::new();
        store
            .save(&[PersistedLine {
                product_id: "silog-1".to_string(),
                variants: beef(),
                addons: eggs(2),
                quantity: 1,
            }])
            .unwrap();

        let mut repriced = silog("silog-1", 5000);
        repriced.addons[0].price_delta = 2000;
        let mut catalog = HashMap::new();
        catalog.insert(repriced.id.clone(), repriced);

        let cart = Cart::load(store, &catalog).unwrap();
        assert_eq!(cart.total(), 5000 + 2 * 2000);
    }

    #[test]
    fn rehydration_drops_lines_for_vanished_products() {
        let store = MemoryCartStore::new();
        store
            .save(&[
                PersistedLine {
                    product_id: "gone".to_string(),
                    variants: Default::default(),
                    addons: Default::default(),
                    quantity: 1,
                },
                PersistedLine {
                    product_id: "silog-1".to_string(),
                    variants: beef(),
                    addons: Default::default(),
                    quantity: 2,
                },
            ])
            .unwrap();

        let mut catalog = HashMap::new();
        catalog.insert("silog-1".to_string(), silog("silog-1", 4500));

        let cart = Cart::load(store, &catalog).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), 9000);
    }
}
