//! Pickup Server - order lifecycle engine for the pickup ordering platform
//!
//! # Architecture
//!
//! - **Submission** (`orders::submit`): cart snapshot → validated, re-priced,
//!   persisted order
//! - **State machine** (`orders::lifecycle`): fulfillment status transitions
//!   with terminal states
//! - **Broadcast** (`broadcast`): staff-wide and per-customer event fan-out,
//!   at-most-once
//! - **Gateways** (`gateway`, `catalog`, `notify`): external collaborators
//!   behind traits, with in-memory implementations for tests and default
//!   wiring
//! - **HTTP API** (`api`): axum routes over the above
//!
//! # Module Structure
//!
//! ```text
//! pickup-server/src/
//! ├── core/       # config, state, server
//! ├── api/        # HTTP routes and handlers
//! ├── orders/     # submission pipeline + lifecycle state machine
//! ├── broadcast/  # event fan-out
//! ├── gateway.rs  # order persistence seam
//! ├── catalog.rs  # product lookup seam
//! ├── notify.rs   # best-effort customer notification seam
//! └── utils/      # errors, logging
//! ```

pub mod api;
pub mod broadcast;
pub mod catalog;
pub mod core;
pub mod gateway;
pub mod notify;
pub mod orders;
pub mod utils;

// Re-export public types
pub use broadcast::EventBroadcaster;
pub use catalog::{MemoryCatalog, ProductCatalog};
pub use crate::core::{Config, Server, ServerState};
pub use gateway::{MemoryOrderGateway, OrderGateway};
pub use notify::{Notifier, TracingNotifier};
pub use orders::{LifecycleEngine, OrderFlowError, SubmissionPipeline};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
