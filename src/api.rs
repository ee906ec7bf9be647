//! HTTP API for the chat backend

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::chat::{ChatGateway, SessionStore};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub gateway: Arc<ChatGateway>,
}

impl AppState {
    pub fn new(gateway: ChatGateway) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            gateway: Arc::new(gateway),
        }
    }
}
