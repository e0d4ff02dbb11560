//! Database schema and record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS restaurants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cuisine TEXT NOT NULL,
    location TEXT NOT NULL,
    price_range TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS menu_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    restaurant_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price_cents INTEGER NOT NULL,

    FOREIGN KEY (restaurant_id) REFERENCES restaurants(id)
);

CREATE INDEX IF NOT EXISTS idx_menu_items_restaurant ON menu_items(restaurant_id);

CREATE TABLE IF NOT EXISTS reservations (
    id TEXT PRIMARY KEY,
    restaurant_id INTEGER NOT NULL,
    user_id TEXT NOT NULL,
    reservation_time TEXT NOT NULL,
    party_size INTEGER NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (restaurant_id) REFERENCES restaurants(id)
);

CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    restaurant_id INTEGER NOT NULL,
    user_id TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (restaurant_id) REFERENCES restaurants(id)
);

CREATE TABLE IF NOT EXISTS sessions (
    conversation_id TEXT PRIMARY KEY,
    state TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Sample catalog rows, inserted only when the restaurants table is empty
pub const SEED_RESTAURANTS: &[(&str, &str, &str, &str)] = &[
    ("Pizza Palace", "Italian", "Downtown", "$$"),
    ("Sushi Haven", "Japanese", "Midtown", "$$$"),
    ("Taco Fiesta", "Mexican", "Uptown", "$"),
];

/// Sample menu rows as (restaurant row number, name, description, price in cents)
pub const SEED_MENU_ITEMS: &[(i64, &str, &str, i64)] = &[
    (1, "Margherita Pizza", "Classic pizza with tomato and mozzarella", 1299),
    (1, "Pepperoni Pizza", "Pepperoni and cheese", 1499),
    (2, "California Roll", "Crab, avocado, and cucumber", 899),
    (2, "Spicy Tuna Roll", "Tuna with spicy mayo", 999),
    (3, "Chicken Tacos", "Grilled chicken with salsa", 699),
];

/// Restaurant record
///
/// Read-only reference data. Serializable because listings are frozen into
/// session state, so a later numeric reply resolves against the exact rows
/// the user saw even if the catalog changes between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub price_range: String,
}

/// Menu item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: String,
    /// Fixed-point currency, stored as cents
    pub price_cents: i64,
}

impl MenuItem {
    /// Render the price as a dollar amount with two decimals, e.g. "12.99"
    pub fn price_display(&self) -> String {
        format!("{}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Reservation record (append-only; never read back by the engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub restaurant_id: i64,
    pub user_id: String,
    pub reservation_time: DateTime<Utc>,
    pub party_size: i64,
    pub created_at: DateTime<Utc>,
}

/// Order record (append-only; status lifecycle beyond "Pending" is not modeled)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub restaurant_id: i64,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
