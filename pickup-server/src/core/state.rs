//! Shared server state
//!
//! All services are Arc'd and injected at construction; tests substitute
//! in-memory fakes through [`ServerState::new`]. Nothing in here is a
//! process-wide singleton - the state's lifecycle is the server's lifecycle.

use std::sync::Arc;

use crate::broadcast::EventBroadcaster;
use crate::catalog::{MemoryCatalog, ProductCatalog};
use crate::core::Config;
use crate::gateway::{MemoryOrderGateway, OrderGateway};
use crate::notify::{Notifier, TracingNotifier};
use crate::orders::{LifecycleEngine, SubmissionPipeline};

/// Cloneable handle to every service the API layer needs
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub orders: Arc<dyn OrderGateway>,
    pub broadcaster: Arc<EventBroadcaster>,
    pub submission: SubmissionPipeline,
    pub lifecycle: LifecycleEngine,
}

impl ServerState {
    /// Wire the engines from explicitly provided collaborators
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        orders: Arc<dyn OrderGateway>,
        broadcaster: Arc<EventBroadcaster>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let submission = SubmissionPipeline::new(
            catalog.clone(),
            orders.clone(),
            broadcaster.clone(),
            notifier.clone(),
        );
        let lifecycle = LifecycleEngine::new(orders.clone(), broadcaster.clone(), notifier);
        Self {
            catalog,
            orders,
            broadcaster,
            submission,
            lifecycle,
        }
    }

    /// Default wiring: in-memory collaborators sized from the config
    pub fn initialize(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryCatalog::new()),
            Arc::new(MemoryOrderGateway::new()),
            Arc::new(EventBroadcaster::with_capacity(
                config.event_channel_capacity,
            )),
            Arc::new(TracingNotifier),
        )
    }
}
