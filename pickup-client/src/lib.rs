//! Pickup Client - customer-side cart state
//!
//! Holds the cart aggregate and its durable local persistence. The cart has
//! no server-side representation: it lives entirely in the customer's
//! session and is handed to the server only as an immutable snapshot at
//! checkout.

pub mod cart;
pub mod error;
pub mod store;

pub use cart::Cart;
pub use error::{CartError, CartResult};
pub use store::{CartStore, MemoryCartStore, RedbCartStore, StoreError, StoreResult};

// Re-export shared types for convenience
pub use shared::cart::{CartLine, CartSnapshot, PersistedLine};
