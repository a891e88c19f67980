//! Price engine - deterministic unit pricing for customizable products
//!
//! Pure and side-effect free. The same function runs client-side for live
//! cart display and server-side for authoritative validation at submission,
//! and the two must agree bit-for-bit, which is why all arithmetic is
//! integer cents - no floating point anywhere.

use thiserror::Error;

use crate::cart::{AddonSelection, VariantSelection};
use crate::models::Product;

/// A single pricing validation failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingIssue {
    #[error("A selection for \"{group}\" is required")]
    MissingRequiredVariant { group: String },

    #[error("Variant group \"{group}\" does not exist")]
    UnknownVariantGroup { group: String },

    #[error("Option \"{option}\" is not part of \"{group}\"")]
    UnknownVariantOption { group: String, option: String },

    #[error("Add-on \"{addon}\" does not exist")]
    UnknownAddon { addon: String },

    #[error("Add-on \"{addon}\" allows at most {max}, got {got}")]
    AddonQuantityExceeded { addon: String, max: u32, got: u32 },
}

/// Compute the unit price in cents for a product with the given selections.
///
/// `unit_price = base_price + Σ variant deltas + Σ addon delta × quantity`.
///
/// Validation rules:
/// - every `required` variant group must have a selection;
/// - a selected option must exist inside its group, and a selection may not
///   name a group the product does not define (single-select per group is
///   guaranteed by the `VariantSelection` map shape);
/// - each add-on quantity must satisfy `0 ≤ qty ≤ max_quantity`; zero
///   entries are ignored.
///
/// All issues are collected rather than short-circuited so a caller can
/// surface the complete list at once.
pub fn unit_price(
    product: &Product,
    variants: &VariantSelection,
    addons: &AddonSelection,
) -> Result<i64, Vec<PricingIssue>> {
    let mut issues = Vec::new();
    let mut price = product.base_price;

    for group in &product.variant_groups {
        match variants.get(&group.name) {
            Some(option_name) => match group.option(option_name) {
                Some(option) => price += option.price_delta,
                None => issues.push(PricingIssue::UnknownVariantOption {
                    group: group.name.clone(),
                    option: option_name.clone(),
                }),
            },
            None if group.required => issues.push(PricingIssue::MissingRequiredVariant {
                group: group.name.clone(),
            }),
            None => {}
        }
    }

    for group_name in variants.keys() {
        if product.variant_group(group_name).is_none() {
            issues.push(PricingIssue::UnknownVariantGroup {
                group: group_name.clone(),
            });
        }
    }

    for (addon_name, &qty) in addons {
        if qty == 0 {
            continue;
        }
        match product.addon(addon_name) {
            Some(addon) if qty > addon.max_quantity => {
                issues.push(PricingIssue::AddonQuantityExceeded {
                    addon: addon_name.clone(),
                    max: addon.max_quantity,
                    got: qty,
                });
            }
            Some(addon) => price += addon.price_delta * i64::from(qty),
            None => issues.push(PricingIssue::UnknownAddon {
                addon: addon_name.clone(),
            }),
        }
    }

    if issues.is_empty() { Ok(price) } else { Err(issues) }
}
