//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::RecordStore;
use crate::domain::retention_sweeper::SweeperStatus;

/// Handles shared by every request.
///
/// Cloning is cheap: every field is reference counted. The store handle is
/// created once at startup and is the only process-wide resource.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub store: Arc<dyn RecordStore>,
    pub sweeper_status: Arc<SweeperStatus>,
}

impl AppState {
    /// Builds the services over a single store handle.
    pub fn new(
        store: Arc<dyn RecordStore>,
        base_url: impl Into<String>,
        sweeper_status: Arc<SweeperStatus>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            store,
            sweeper_status,
        }
    }
}
