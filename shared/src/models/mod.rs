//! Data models shared between the server and the customer client

pub mod order;
pub mod product;

pub use order::{
    FulfillmentStatus, Order, OrderCreate, OrderItem, PaymentMethod, PaymentStatus, PickupInfo,
};
pub use product::{Addon, Product, VariantGroup, VariantOption};
