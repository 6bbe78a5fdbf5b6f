// Application state module
// Immutable configuration plus the factory that builds per-invocation clients

use std::sync::Arc;

use super::types::Config;
use crate::clients::ClientFactory;

/// Application state shared by every connection
///
/// Holds nothing mutable: collaborators are built fresh for each invocation
/// through `clients`.
pub struct AppState {
    pub config: Config,
    pub clients: Arc<dyn ClientFactory>,
}

impl AppState {
    pub fn new(config: Config, clients: Arc<dyn ClientFactory>) -> Self {
        Self { config, clients }
    }
}
