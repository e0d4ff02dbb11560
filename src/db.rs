//! Database module for the restaurant bot
//!
//! Provides catalog reads, append-only reservation/order inserts, and
//! per-conversation session persistence.

mod schema;

pub use schema::*;

use crate::engine::SessionState;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Session state serialization error: {0}")]
    StateSerde(#[from] serde_json::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert the sample catalog, but only when the restaurants table is empty
    pub fn seed_sample_data(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM restaurants", [], |row| row.get(0))?;
        if count > 0 {
            tracing::info!("Database already initialized, skipping sample data");
            return Ok(());
        }

        let mut restaurant_ids = Vec::with_capacity(SEED_RESTAURANTS.len());
        for (name, cuisine, location, price_range) in SEED_RESTAURANTS {
            conn.execute(
                "INSERT INTO restaurants (name, cuisine, location, price_range) VALUES (?1, ?2, ?3, ?4)",
                params![name, cuisine, location, price_range],
            )?;
            restaurant_ids.push(conn.last_insert_rowid());
        }

        for (restaurant_no, name, description, price_cents) in SEED_MENU_ITEMS {
            let restaurant_id = restaurant_ids[usize::try_from(restaurant_no - 1).unwrap_or(0)];
            conn.execute(
                "INSERT INTO menu_items (restaurant_id, name, description, price_cents) VALUES (?1, ?2, ?3, ?4)",
                params![restaurant_id, name, description, price_cents],
            )?;
        }

        tracing::info!(
            restaurants = SEED_RESTAURANTS.len(),
            menu_items = SEED_MENU_ITEMS.len(),
            "Database initialized with sample data"
        );
        Ok(())
    }

    // ==================== Catalog Reads ====================

    /// List restaurants in store order, bounded at `limit` rows
    pub fn list_restaurants(&self, limit: usize) -> DbResult<Vec<Restaurant>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, cuisine, location, price_range FROM restaurants LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(Restaurant {
                id: row.get(0)?,
                name: row.get(1)?,
                cuisine: row.get(2)?,
                location: row.get(3)?,
                price_range: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// List menu items for a restaurant, in store order
    pub fn list_menu_items(&self, restaurant_id: i64) -> DbResult<Vec<MenuItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, restaurant_id, name, description, price_cents
             FROM menu_items WHERE restaurant_id = ?1",
        )?;

        let rows = stmt.query_map(params![restaurant_id], |row| {
            Ok(MenuItem {
                id: row.get(0)?,
                restaurant_id: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
                price_cents: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Transaction Writes ====================

    /// Insert a reservation row, returning the stored record
    pub fn create_reservation(
        &self,
        restaurant_id: i64,
        user_id: &str,
        party_size: i64,
        reservation_time: DateTime<Utc>,
    ) -> DbResult<Reservation> {
        let conn = self.conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO reservations (id, restaurant_id, user_id, reservation_time, party_size, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                restaurant_id,
                user_id,
                reservation_time.to_rfc3339(),
                party_size,
                now.to_rfc3339()
            ],
        )?;

        Ok(Reservation {
            id,
            restaurant_id,
            user_id: user_id.to_string(),
            reservation_time,
            party_size,
            created_at: now,
        })
    }

    /// Insert an order row, returning the stored record
    pub fn create_order(&self, restaurant_id: i64, user_id: &str, status: &str) -> DbResult<Order> {
        let conn = self.conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO orders (id, restaurant_id, user_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, restaurant_id, user_id, status, now.to_rfc3339()],
        )?;

        Ok(Order {
            id,
            restaurant_id,
            user_id: user_id.to_string(),
            status: status.to_string(),
            created_at: now,
        })
    }

    /// List reservations for a restaurant
    #[allow(dead_code)] // Useful for tests and inspection
    pub fn list_reservations(&self, restaurant_id: i64) -> DbResult<Vec<Reservation>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, restaurant_id, user_id, reservation_time, party_size, created_at
             FROM reservations WHERE restaurant_id = ?1 ORDER BY created_at",
        )?;

        let rows = stmt.query_map(params![restaurant_id], |row| {
            Ok(Reservation {
                id: row.get(0)?,
                restaurant_id: row.get(1)?,
                user_id: row.get(2)?,
                reservation_time: parse_datetime(&row.get::<_, String>(3)?),
                party_size: row.get(4)?,
                created_at: parse_datetime(&row.get::<_, String>(5)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// List orders for a restaurant
    #[allow(dead_code)] // Useful for tests and inspection
    pub fn list_orders(&self, restaurant_id: i64) -> DbResult<Vec<Order>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, restaurant_id, user_id, status, created_at
             FROM orders WHERE restaurant_id = ?1 ORDER BY created_at",
        )?;

        let rows = stmt.query_map(params![restaurant_id], |row| {
            Ok(Order {
                id: row.get(0)?,
                restaurant_id: row.get(1)?,
                user_id: row.get(2)?,
                status: row.get(3)?,
                created_at: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Session State ====================

    /// Get the session state for a conversation, defaulting to the empty
    /// record when the conversation has no prior state
    pub fn get_session(&self, conversation_id: &str) -> DbResult<SessionState> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT state FROM sessions WHERE conversation_id = ?1")?;

        let state_json: Option<String> = stmt
            .query_row(params![conversation_id], |row| row.get(0))
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        match state_json {
            Some(s) => Ok(serde_json::from_str(&s)?),
            None => Ok(SessionState::default()),
        }
    }

    /// Persist the session state for a conversation
    pub fn set_session(&self, conversation_id: &str, state: &SessionState) -> DbResult<()> {
        let state_json = serde_json::to_string(state)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sessions (conversation_id, state, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(conversation_id) DO UPDATE SET state = ?2, updated_at = ?3",
            params![conversation_id, state_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
