//! Gateway state
//!
//! Application state shared by every request handler.

use std::sync::Arc;

use relay_common::HubConfig;
use relay_core::MessageStore;

use crate::hub::HubHandle;
use crate::session::SessionConfig;

/// Gateway application state
#[derive(Clone, Debug)]
pub struct GatewayState {
    session: SessionConfig,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(hub: HubHandle, store: Arc<dyn MessageStore>, hub_config: HubConfig) -> Self {
        Self {
            session: SessionConfig {
                hub,
                store,
                outbound_buffer: hub_config.outbound_buffer,
            },
        }
    }

    /// Get the hub handle
    pub fn hub(&self) -> &HubHandle {
        &self.session.hub
    }

    /// Settings for a new session
    pub fn session_config(&self) -> SessionConfig {
        self.session.clone()
    }
}
