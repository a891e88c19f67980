//! Order Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cart::{AddonSelection, VariantSelection};

/// Fulfillment status of an order
///
/// `Completed` and `Cancelled` are terminal; see [`can_transition_to`] for
/// the full reachability table.
///
/// [`can_transition_to`]: FulfillmentStatus::can_transition_to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl FulfillmentStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a transition to `target` is permitted from this status.
    ///
    /// Forward one step along pending → confirmed → preparing → ready →
    /// completed, or to `cancelled` from any non-terminal state. Same-status
    /// "transitions" are not in the table; the lifecycle engine treats them
    /// as an idempotent no-op before consulting it.
    pub fn can_transition_to(self, target: Self) -> bool {
        use FulfillmentStatus::*;
        if self.is_terminal() {
            return false;
        }
        match (self, target) {
            // Escape hatch: any non-terminal state may cancel
            (_, Cancelled) => true,
            // One step forward, never backward, never skipping
            (Pending, Confirmed)
            | (Confirmed, Preparing)
            | (Preparing, Ready)
            | (Ready, Completed) => true,
            _ => false,
        }
    }
}

/// Unrecognized fulfillment status string
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown fulfillment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FulfillmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "PREPARING" => Ok(Self::Preparing),
            "READY" => Ok(Self::Ready),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Preparing => write!(f, "PREPARING"),
            Self::Ready => write!(f, "READY"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Declared payment method (recorded, never captured)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Gcash,
    Cod,
}

/// Unrecognized payment method string
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unrecognized payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcash" => Ok(Self::Gcash),
            "cod" => Ok(Self::Cod),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Payment status flag (no gateway integration)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Paid,
    Failed,
}

/// Pickup details collected at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickupInfo {
    pub pickup_time: String,
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Frozen order line - copied from the cart snapshot at submission, never
/// linked back to the live cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price in cents, revalidated server-side
    pub unit_price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub variants: VariantSelection,
    #[serde(default)]
    pub addons: AddonSelection,
}

impl OrderItem {
    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Order entity
///
/// Items and total are immutable after creation; only the two status fields
/// and `updated_at` change, and only through the lifecycle engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    /// Owning customer (None for guest orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub items: Vec<OrderItem>,
    /// Total in cents, frozen at creation
    pub total: i64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub fulfillment_status: FulfillmentStatus,
    pub pickup: PickupInfo,
    /// Unix milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload handed to the persistence gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub pickup: PickupInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        use FulfillmentStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn skipping_and_backward_transitions_rejected() {
        use FulfillmentStatus::*;
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Ready.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Confirmed));
    }

    #[test]
    fn cancel_escape_hatch_from_non_terminal_only() {
        use FulfillmentStatus::*;
        for from in [Pending, Confirmed, Preparing, Ready] {
            assert!(from.can_transition_to(Cancelled), "{from} -> CANCELLED");
        }
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Ready));
    }

    #[test]
    fn payment_method_parsing() {
        assert_eq!("gcash".parse::<PaymentMethod>(), Ok(PaymentMethod::Gcash));
        assert_eq!("COD".parse::<PaymentMethod>(), Ok(PaymentMethod::Cod));
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
