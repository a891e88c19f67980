//! Cart line types and line identity
//!
//! The cart itself is client-held state (see the `pickup-client` crate); the
//! line types live here because the submission pipeline consumes a cart
//! snapshot server-side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Chosen variant option per group (group name → option name).
///
/// A `BTreeMap` keeps the encoding canonical and makes "more than one option
/// per group" unrepresentable.
pub type VariantSelection = BTreeMap<String, String>;

/// Chosen add-on quantities (add-on name → quantity)
pub type AddonSelection = BTreeMap<String, u32>;

/// Content-addressed line identity over (product, variant choice, add-on
/// multiset). Two additions with the same signature merge into one line.
///
/// Zero-quantity add-on entries do not contribute, so `{egg: 0}` and an
/// absent entry hash identically.
pub fn line_signature(
    product_id: &str,
    variants: &VariantSelection,
    addons: &AddonSelection,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(product_id.as_bytes());
    for (group, option) in variants {
        hasher.update([0x1f, b'v']);
        hasher.update(group.as_bytes());
        hasher.update([0x1f]);
        hasher.update(option.as_bytes());
    }
    for (addon, qty) in addons {
        if *qty == 0 {
            continue;
        }
        hasher.update([0x1f, b'a']);
        hasher.update(addon.as_bytes());
        hasher.update(qty.to_le_bytes());
    }
    hex::encode(&hasher.finalize()[..8])
}

/// Live cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Line identity (see [`line_signature`])
    pub line_id: String,
    pub product_id: String,
    // Display metadata, cached for rendering only
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price in cents - derived, recomputed on every load
    pub unit_price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub variants: VariantSelection,
    #[serde(default)]
    pub addons: AddonSelection,
}

impl CartLine {
    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Immutable cart copy handed to the submission pipeline. Mutating the live
/// cart after taking a snapshot does not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    /// Derived: Σ unit_price × quantity, in cents
    pub total: i64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Durable client-local cart line. Prices and totals are deliberately
/// excluded; both are recomputed against the current catalog on rehydration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedLine {
    pub product_id: String,
    #[serde(default)]
    pub variants: VariantSelection,
    #[serde(default)]
    pub addons: AddonSelection,
    pub quantity: u32,
}
