//! Trait seams between the dialog engine and its stores
//!
//! These traits enable testing the engine with mock implementations.

use super::state::SessionState;
use crate::db::{Database, MenuItem, Restaurant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Read-only catalog queries
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// List restaurants in store order, bounded at `limit`
    async fn list_restaurants(&self, limit: usize) -> Result<Vec<Restaurant>, String>;

    /// List menu items for a restaurant
    async fn list_menu_items(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, String>;
}

/// Append-only reservation and order inserts
#[async_trait]
pub trait TransactionWriter: Send + Sync {
    /// Insert a reservation row, returning its store-assigned id
    async fn create_reservation(
        &self,
        restaurant_id: i64,
        user_id: &str,
        party_size: i64,
        reservation_time: DateTime<Utc>,
    ) -> Result<String, String>;

    /// Insert an order row, returning its store-assigned id
    async fn create_order(
        &self,
        restaurant_id: i64,
        user_id: &str,
        status: &str,
    ) -> Result<String, String>;
}

/// Per-conversation session state persistence
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the state for a conversation (the all-absent record when the
    /// conversation has never been seen)
    async fn get(&self, conversation_id: &str) -> Result<SessionState, String>;

    /// Persist the state for a conversation
    async fn set(&self, conversation_id: &str, state: &SessionState) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: CatalogReader + ?Sized> CatalogReader for Arc<T> {
    async fn list_restaurants(&self, limit: usize) -> Result<Vec<Restaurant>, String> {
        (**self).list_restaurants(limit).await
    }

    async fn list_menu_items(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, String> {
        (**self).list_menu_items(restaurant_id).await
    }
}

#[async_trait]
impl<T: TransactionWriter + ?Sized> TransactionWriter for Arc<T> {
    async fn create_reservation(
        &self,
        restaurant_id: i64,
        user_id: &str,
        party_size: i64,
        reservation_time: DateTime<Utc>,
    ) -> Result<String, String> {
        (**self)
            .create_reservation(restaurant_id, user_id, party_size, reservation_time)
            .await
    }

    async fn create_order(
        &self,
        restaurant_id: i64,
        user_id: &str,
        status: &str,
    ) -> Result<String, String> {
        (**self).create_order(restaurant_id, user_id, status).await
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get(&self, conversation_id: &str) -> Result<SessionState, String> {
        (**self).get(conversation_id).await
    }

    async fn set(&self, conversation_id: &str, state: &SessionState) -> Result<(), String> {
        (**self).set(conversation_id, state).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter exposing `Database` through the engine's store traits
#[derive(Clone)]
pub struct DatabaseStore {
    db: Database,
}

impl DatabaseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogReader for DatabaseStore {
    async fn list_restaurants(&self, limit: usize) -> Result<Vec<Restaurant>, String> {
        self.db.list_restaurants(limit).map_err(|e| e.to_string())
    }

    async fn list_menu_items(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, String> {
        self.db
            .list_menu_items(restaurant_id)
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl TransactionWriter for DatabaseStore {
    async fn create_reservation(
        &self,
        restaurant_id: i64,
        user_id: &str,
        party_size: i64,
        reservation_time: DateTime<Utc>,
    ) -> Result<String, String> {
        self.db
            .create_reservation(restaurant_id, user_id, party_size, reservation_time)
            .map(|r| r.id)
            .map_err(|e| e.to_string())
    }

    async fn create_order(
        &self,
        restaurant_id: i64,
        user_id: &str,
        status: &str,
    ) -> Result<String, String> {
        self.db
            .create_order(restaurant_id, user_id, status)
            .map(|o| o.id)
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl SessionStore for DatabaseStore {
    async fn get(&self, conversation_id: &str) -> Result<SessionState, String> {
        self.db.get_session(conversation_id).map_err(|e| e.to_string())
    }

    async fn set(&self, conversation_id: &str, state: &SessionState) -> Result<(), String> {
        self.db
            .set_session(conversation_id, state)
            .map_err(|e| e.to_string())
    }
}
