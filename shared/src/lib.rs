//! Shared types for the pickup ordering platform
//!
//! Common types used on both sides of the wire: product and order models,
//! cart line types with content-addressed identity, the deterministic price
//! engine, and broadcast event types.
//!
//! Pricing lives here rather than in the server because the customer client
//! (live cart display) and the server (authoritative validation at
//! submission) must agree bit-for-bit on every unit price.

pub mod cart;
pub mod event;
pub mod models;
pub mod pricing;

// Re-exports
pub use cart::{AddonSelection, CartLine, CartSnapshot, PersistedLine, VariantSelection};
pub use event::{EventPayload, OrderEvent};
pub use serde::{Deserialize, Serialize};
