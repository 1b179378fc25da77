//! HTTP API for the site backend

mod handlers;
mod types;

pub use handlers::create_router;

use crate::auth::AuthService;
use crate::content::ContentStore;
use crate::notify::SalesNotifier;
use crate::reasoning::{ReasoningEngine, SessionStore};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: ReasoningEngine,
    pub sessions: Arc<dyn SessionStore>,
    pub content: Arc<ContentStore>,
    pub auth: Arc<AuthService>,
    pub notifier: SalesNotifier,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        content: Arc<ContentStore>,
        auth: Arc<AuthService>,
        notifier: SalesNotifier,
    ) -> Self {
        Self {
            engine: ReasoningEngine::new(),
            sessions,
            content,
            auth,
            notifier,
        }
    }
}
