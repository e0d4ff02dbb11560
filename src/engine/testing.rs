//! Mock store implementations for testing
//!
//! These mocks enable exercising the engine without real I/O.

use super::state::SessionState;
use super::traits::{CatalogReader, SessionStore, TransactionWriter};
use crate::db::{MenuItem, Restaurant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

// ============================================================================
// Mock Catalog
// ============================================================================

/// In-memory catalog with optional injected read failure
pub struct MemoryCatalog {
    restaurants: Mutex<Vec<Restaurant>>,
    menus: Mutex<HashMap<i64, Vec<MenuItem>>>,
    fail: bool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            restaurants: Mutex::new(Vec::new()),
            menus: Mutex::new(HashMap::new()),
            fail: false,
        }
    }

    pub fn with_restaurants(rows: Vec<Restaurant>) -> Self {
        let catalog = Self::new();
        *catalog.restaurants.lock().unwrap() = rows;
        catalog
    }

    /// A catalog whose every read fails
    pub fn failing() -> Self {
        Self {
            restaurants: Mutex::new(Vec::new()),
            menus: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn add_menu(&self, restaurant_id: i64, items: Vec<MenuItem>) {
        self.menus.lock().unwrap().insert(restaurant_id, items);
    }

    /// Replace the restaurant rows (to simulate catalog drift between turns)
    pub fn set_restaurants(&self, rows: Vec<Restaurant>) {
        *self.restaurants.lock().unwrap() = rows;
    }
}

#[async_trait]
impl CatalogReader for MemoryCatalog {
    async fn list_restaurants(&self, limit: usize) -> Result<Vec<Restaurant>, String> {
        if self.fail {
            return Err("injected catalog failure".to_string());
        }
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_menu_items(&self, restaurant_id: i64) -> Result<Vec<MenuItem>, String> {
        if self.fail {
            return Err("injected catalog failure".to_string());
        }
        Ok(self
            .menus
            .lock()
            .unwrap()
            .get(&restaurant_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Recording Writer
// ============================================================================

/// Transaction writer that records every insert, with optional injected
/// write failure
pub struct RecordingWriter {
    /// (restaurant_id, user_id, party_size, reservation_time) per insert
    pub reservations: Mutex<Vec<(i64, String, i64, DateTime<Utc>)>>,
    /// (restaurant_id, user_id, status) per insert
    pub orders: Mutex<Vec<(i64, String, String)>>,
    fail: bool,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A writer whose every insert fails
    pub fn failing() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl TransactionWriter for RecordingWriter {
    async fn create_reservation(
        &self,
        restaurant_id: i64,
        user_id: &str,
        party_size: i64,
        reservation_time: DateTime<Utc>,
    ) -> Result<String, String> {
        if self.fail {
            return Err("injected write failure".to_string());
        }
        let mut reservations = self.reservations.lock().unwrap();
        reservations.push((
            restaurant_id,
            user_id.to_string(),
            party_size,
            reservation_time,
        ));
        Ok(format!("res-{}", reservations.len()))
    }

    async fn create_order(
        &self,
        restaurant_id: i64,
        user_id: &str,
        status: &str,
    ) -> Result<String, String> {
        if self.fail {
            return Err("injected write failure".to_string());
        }
        let mut orders = self.orders.lock().unwrap();
        orders.push((restaurant_id, user_id.to_string(), status.to_string()));
        Ok(format!("ord-{}", orders.len()))
    }
}

// ============================================================================
// Memory Sessions
// ============================================================================

/// In-memory session store that counts writes, with optional injected
/// read or write failure
pub struct MemorySessions {
    states: Mutex<HashMap<String, SessionState>>,
    set_calls: Mutex<usize>,
    fail_get: bool,
    fail_set: bool,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            set_calls: Mutex::new(0),
            fail_get: false,
            fail_set: false,
        }
    }

    /// A store whose every read fails
    pub fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::new()
        }
    }

    /// A store whose every write fails
    pub fn failing_set() -> Self {
        Self {
            fail_set: true,
            ..Self::new()
        }
    }

    /// The state currently stored for a conversation (default if none)
    pub fn stored(&self, conversation_id: &str) -> SessionState {
        self.states
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of `set` calls observed (seeding via `set` counts too)
    pub fn set_call_count(&self) -> usize {
        *self.set_calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn get(&self, conversation_id: &str) -> Result<SessionState, String> {
        if self.fail_get {
            return Err("injected session read failure".to_string());
        }
        Ok(self.stored(conversation_id))
    }

    async fn set(&self, conversation_id: &str, state: &SessionState) -> Result<(), String> {
        if self.fail_set {
            return Err("injected session write failure".to_string());
        }
        *self.set_calls.lock().unwrap() += 1;
        self.states
            .lock()
            .unwrap()
            .insert(conversation_id.to_string(), state.clone());
        Ok(())
    }
}
