//! Product Model

use serde::{Deserialize, Serialize};

/// One option inside a variant group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantOption {
    pub name: String,
    /// Price delta in cents (zero or negative allowed)
    #[serde(default)]
    pub price_delta: i64,
}

/// Named set of mutually exclusive options (e.g. flavor, size)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantGroup {
    pub name: String,
    /// Exactly one option must be selected when set
    #[serde(default)]
    pub required: bool,
    pub options: Vec<VariantOption>,
}

impl VariantGroup {
    /// Look up an option by name
    pub fn option(&self, name: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// Optional quantity-bounded priced extra, independent of variant groups
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Addon {
    pub name: String,
    /// Price delta in cents per unit
    pub price_delta: i64,
    /// Maximum selectable quantity per line item
    pub max_quantity: u32,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Base price in cents
    pub base_price: i64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    /// Ordered; presentation follows this order
    #[serde(default)]
    pub variant_groups: Vec<VariantGroup>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Look up a variant group by name
    pub fn variant_group(&self, name: &str) -> Option<&VariantGroup> {
        self.variant_groups.iter().find(|g| g.name == name)
    }

    /// Look up an add-on by name
    pub fn addon(&self, name: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.name == name)
    }
}
