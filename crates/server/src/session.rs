//! Session Management
//!
//! One [`HotelChatbot`] per session; the classifier and knowledge base are
//! shared through [`ChatbotResources`]. Sessions live in memory only.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use hotel_concierge_agent::{ChatbotResources, HotelChatbot};

use crate::ServerError;

/// A guest conversation
pub struct Session {
    pub id: String,
    chatbot: Mutex<HotelChatbot>,
    created_at: Instant,
    last_activity: RwLock<Instant>,
}

impl Session {
    pub fn new(id: impl Into<String>, resources: Arc<ChatbotResources>) -> Self {
        let now = Instant::now();
        Self {
            id: id.into(),
            chatbot: Mutex::new(HotelChatbot::new(resources)),
            created_at: now,
            last_activity: RwLock::new(now),
        }
    }

    /// Run `f` with exclusive access to the chatbot
    pub fn with_chatbot<R>(&self, f: impl FnOnce(&mut HotelChatbot) -> R) -> R {
        self.touch();
        let mut chatbot = self.chatbot.lock();
        f(&mut chatbot)
    }

    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    resources: Arc<ChatbotResources>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(resources: Arc<ChatbotResources>, max_sessions: usize) -> Self {
        Self::with_config(
            resources,
            max_sessions,
            Duration::from_secs(3600),
            Duration::from_secs(300),
        )
    }

    /// Create a new session manager with custom timeout and cleanup interval
    pub fn with_config(
        resources: Arc<ChatbotResources>,
        max_sessions: usize,
        session_timeout: Duration,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            resources,
            max_sessions,
            session_timeout,
            cleanup_interval,
        }
    }

    pub fn resources(&self) -> &Arc<ChatbotResources> {
        &self.resources
    }

    /// Start a background task that periodically drops idle sessions
    ///
    /// Send `true` on the returned channel to stop it.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let before = manager.count();
                        manager.cleanup_expired();
                        let after = manager.count();
                        if before != after {
                            tracing::info!(
                                removed = before - after,
                                remaining = after,
                                "Session cleanup"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("Session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Create a new session with a fresh conversation context
    pub fn create(&self) -> Result<Arc<Session>, ServerError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);

            if sessions.len() >= self.max_sessions {
                return Err(ServerError::Capacity(self.max_sessions));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(&id, self.resources.clone()));
        sessions.insert(id.clone(), session.clone());

        tracing::info!(session_id = %id, active = sessions.len(), "Created session");
        Ok(session)
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> Result<Arc<Session>, ServerError> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
    }

    /// Remove a session; false when it did not exist
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Removed session");
        }
        removed
    }

    /// Active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Drop idle sessions
    pub fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions);
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) {
        let timeout = self.session_timeout;
        sessions.retain(|id, session| {
            let expired = session.is_expired(timeout);
            if expired {
                tracing::info!(session_id = %id, "Expired session");
            }
            !expired
        });
    }

    /// List all session IDs
    pub fn list(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hotel_concierge_agent::PriceEstimator;
    use hotel_concierge_core::{HotelInfo, IntentPrediction, IntentPredictor};

    /// Predictor that always greets
    pub(crate) struct Greeter;

    impl IntentPredictor for Greeter {
        fn predict(&self, _text: &str, _threshold: f32) -> IntentPrediction {
            IntentPrediction::new("greet", 0.9)
        }

        fn top_k(&self, _text: &str, _k: usize) -> Vec<IntentPrediction> {
            vec![IntentPrediction::new("greet", 0.9)]
        }
    }

    pub(crate) fn resources() -> Arc<ChatbotResources> {
        let mut hotel = HotelInfo::default();
        hotel
            .metadata
            .insert("name".to_string(), "Sunset Bay Hotel".to_string());
        hotel
            .responses
            .insert("greet".to_string(), "Welcome to {hotel_name}!".to_string());
        Arc::new(ChatbotResources::new(
            Arc::new(hotel),
            Arc::new(Greeter),
            PriceEstimator::default(),
            0.25,
        ))
    }

    #[test]
    fn test_session_creation() {
        let manager = SessionManager::new(resources(), 10);
        let session = manager.create().unwrap();

        assert!(!session.is_expired(Duration::from_secs(60)));
        assert_eq!(manager.count(), 1);
        assert!(manager.list().contains(&session.id));
    }

    #[test]
    fn test_session_get_and_remove() {
        let manager = SessionManager::new(resources(), 10);
        let id = manager.create().unwrap().id.clone();

        assert_eq!(manager.get(&id).unwrap().id, id);
        assert!(manager.remove(&id));
        assert!(!manager.remove(&id));
        assert!(matches!(manager.get(&id), Err(ServerError::SessionNotFound(_))));
    }

    #[test]
    fn test_capacity_limit() {
        let manager = SessionManager::new(resources(), 1);
        manager.create().unwrap();
        assert!(matches!(manager.create(), Err(ServerError::Capacity(1))));
    }

    #[test]
    fn test_expired_sessions_free_capacity() {
        let manager = SessionManager::with_config(
            resources(),
            1,
            Duration::ZERO,
            Duration::from_secs(300),
        );
        manager.create().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(manager.create().is_ok());
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_sessions_do_not_share_context() {
        let manager = SessionManager::new(resources(), 10);
        let first = manager.create().unwrap();
        let second = manager.create().unwrap();

        first.with_chatbot(|bot| bot.respond("hello there"));
        assert_eq!(first.with_chatbot(|bot| bot.context().history().len()), 2);
        assert!(second.with_chatbot(|bot| bot.context().history().is_empty()));
    }
}
