//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;
use std::time::Duration;

use hotel_concierge_agent::ChatbotResources;
use hotel_concierge_config::Settings;

use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(config: Settings, resources: Arc<ChatbotResources>) -> Self {
        let sessions = SessionManager::with_config(
            resources,
            config.server.max_sessions,
            Duration::from_secs(config.server.session_timeout_secs),
            Duration::from_secs(300),
        );
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
        }
    }

    pub fn resources(&self) -> &Arc<ChatbotResources> {
        self.sessions.resources()
    }
}
