//! Application state for the HTTP server.

use std::sync::Arc;

use crate::cloudbeds::CloudbedsClient;
use crate::config::ConfigStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Vendor API client, shared across requests.
    pub client: Arc<CloudbedsClient>,
    /// Handle to the local credentials file.
    pub config: ConfigStore,
}

impl AppState {
    pub fn new(client: Arc<CloudbedsClient>, config: ConfigStore) -> Self {
        Self { client, config }
    }
}
