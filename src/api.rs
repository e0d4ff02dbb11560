//! HTTP message transport
//!
//! Delivers inbound turns to the dialog engine and relays its replies.
//! The webhook shape mirrors a chat-connector integration: one endpoint,
//! one reply per inbound message.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::db::Database;
use crate::engine::{DatabaseStore, DialogEngine};
use std::sync::Arc;

/// Production engine wired to the database-backed stores
pub type ProductionEngine = DialogEngine<DatabaseStore, DatabaseStore, DatabaseStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProductionEngine>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let store = DatabaseStore::new(db);
        Self {
            engine: Arc::new(DialogEngine::new(store.clone(), store.clone(), store)),
        }
    }
}
