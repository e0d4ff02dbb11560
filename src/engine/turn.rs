//! Turn handling: the intent router and its action handlers
//!
//! One turn = read session state once, route the text through the intent
//! cascade, run the matched action (which may read the catalog or append
//! a reservation/order), then write the session state back exactly once.

use super::intent::{classify, Intent};
use super::state::SessionState;
use super::traits::{CatalogReader, SessionStore, TransactionWriter};
use chrono::Utc;
use thiserror::Error;

/// Fixed bound on listings; no pagination
const RESTAURANT_LIST_LIMIT: usize = 5;

/// Every reservation is booked for a party of this size
const RESERVATION_PARTY_SIZE: i64 = 4;

/// Initial status for every order; the lifecycle beyond this is not modeled
const ORDER_STATUS_PENDING: &str = "Pending";

const WELCOME_REPLY: &str = "Welcome to the Restaurant Bot! How can I help you today? \
     Type \"find restaurants\", \"view menu\", \"make reservation\", or \"place order\".";

const FALLBACK_REPLY: &str = "I didn't understand that. \
     Try saying \"find restaurants\", \"view menu\", \"make reservation\", or \"place order\".";

const NO_RESTAURANTS_REPLY: &str = "No restaurants found.";

const INVALID_SELECTION_REPLY: &str = "Please select a valid restaurant number from the list.";

const NO_MENU_ITEMS_REPLY: &str = "No menu items found for this restaurant.";

const SELECT_FIRST_REPLY: &str =
    "Please select a restaurant first by using \"find restaurants\" and choosing a number.";

const RESERVATION_SUCCESS_REPLY: &str =
    "Reservation made successfully for a party of 4! You'll receive a confirmation soon.";

const ORDER_SUCCESS_REPLY: &str =
    "Order placed successfully! You'll receive updates on your order status.";

/// Store failures that abort a turn
///
/// Validation problems (bad pick, nothing selected, empty result sets) are
/// never errors; they become corrective replies. A `TurnError` means some
/// store call failed, the session write was skipped, and the prior state
/// stands.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("catalog read failed: {0}")]
    Catalog(String),
    #[error("transaction write failed: {0}")]
    Transaction(String),
    #[error("session store failed: {0}")]
    Session(String),
}

/// Per-conversation dialog engine, generic over its store implementations
pub struct DialogEngine<C, T, S>
where
    C: CatalogReader,
    T: TransactionWriter,
    S: SessionStore,
{
    catalog: C,
    writer: T,
    sessions: S,
}

impl<C, T, S> DialogEngine<C, T, S>
where
    C: CatalogReader,
    T: TransactionWriter,
    S: SessionStore,
{
    pub fn new(catalog: C, writer: T, sessions: S) -> Self {
        Self {
            catalog,
            writer,
            sessions,
        }
    }

    /// Handle one inbound turn, returning the outbound reply text.
    ///
    /// The session write at the end is part of the turn: the turn has not
    /// completed until it succeeds, and any store error before it leaves
    /// the persisted state exactly as it was.
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<String, TurnError> {
        let mut session = self
            .sessions
            .get(conversation_id)
            .await
            .map_err(TurnError::Session)?;

        let intent = classify(session.expecting_selection, text);
        tracing::debug!(conversation_id, ?intent, "Routing turn");

        let reply = match intent {
            Intent::Select { raw } => self.select_restaurant(&mut session, &raw).await?,
            Intent::Greet => {
                session.reset_selection();
                WELCOME_REPLY.to_string()
            }
            Intent::ListRestaurants => self.list_restaurants(&mut session).await?,
            Intent::MakeReservation => self.make_reservation(&mut session, user_id).await?,
            Intent::PlaceOrder => self.place_order(&mut session, user_id).await?,
            Intent::Unknown => {
                session.reset_selection();
                FALLBACK_REPLY.to_string()
            }
        };

        self.sessions
            .set(conversation_id, &session)
            .await
            .map_err(TurnError::Session)?;

        Ok(reply)
    }

    /// Produce the unfiltered top-5 listing and freeze it into the session
    async fn list_restaurants(&self, session: &mut SessionState) -> Result<String, TurnError> {
        session.selected_index = None;

        let rows = self
            .catalog
            .list_restaurants(RESTAURANT_LIST_LIMIT)
            .await
            .map_err(TurnError::Catalog)?;

        if rows.is_empty() {
            session.expecting_selection = false;
            session.listed_restaurants.clear();
            return Ok(NO_RESTAURANTS_REPLY.to_string());
        }

        let mut reply = String::from("Here are some restaurants:\n");
        for (i, r) in rows.iter().enumerate() {
            reply.push_str(&format!(
                "{}. {} - {} in {} (Price: {})\n",
                i + 1,
                r.name,
                r.cuisine,
                r.location,
                r.price_range
            ));
        }
        reply.push_str("Type the restaurant number to view its menu.");

        session.listed_restaurants = rows;
        session.expecting_selection = true;
        Ok(reply)
    }

    /// Resolve a numeric pick against the frozen listing and show that
    /// restaurant's menu
    async fn select_restaurant(
        &self,
        session: &mut SessionState,
        raw: &str,
    ) -> Result<String, TurnError> {
        // 1-based pick; parse failure (overflow) and 0 are both invalid
        let index = raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1));

        let restaurant = match index.and_then(|i| session.listed_restaurants.get(i)) {
            Some(r) => r.clone(),
            None => {
                // The user must re-list; a committed selection, if any, stands
                session.expecting_selection = false;
                return Ok(INVALID_SELECTION_REPLY.to_string());
            }
        };

        let items = self
            .catalog
            .list_menu_items(restaurant.id)
            .await
            .map_err(TurnError::Catalog)?;

        if items.is_empty() {
            session.expecting_selection = false;
            return Ok(NO_MENU_ITEMS_REPLY.to_string());
        }

        let mut reply = format!("Menu for {}:\n", restaurant.name);
        for (i, item) in items.iter().enumerate() {
            reply.push_str(&format!(
                "{}. {} - ${} ({})\n",
                i + 1,
                item.name,
                item.price_display(),
                item.description
            ));
        }
        reply.push_str("Type \"place order\" to order or \"make reservation\" to book a table.");

        session.selected_index = index;
        session.expecting_selection = false;
        Ok(reply)
    }

    /// Book a table at the committed restaurant
    async fn make_reservation(
        &self,
        session: &mut SessionState,
        user_id: &str,
    ) -> Result<String, TurnError> {
        let Some(restaurant) = session.selected_restaurant().cloned() else {
            session.reset_selection();
            return Ok(SELECT_FIRST_REPLY.to_string());
        };

        let reservation_id = self
            .writer
            .create_reservation(restaurant.id, user_id, RESERVATION_PARTY_SIZE, Utc::now())
            .await
            .map_err(TurnError::Transaction)?;

        tracing::info!(
            reservation_id = %reservation_id,
            restaurant_id = restaurant.id,
            user_id,
            "Reservation created"
        );

        session.reset_selection();
        Ok(RESERVATION_SUCCESS_REPLY.to_string())
    }

    /// Place an order at the committed restaurant
    async fn place_order(
        &self,
        session: &mut SessionState,
        user_id: &str,
    ) -> Result<String, TurnError> {
        let Some(restaurant) = session.selected_restaurant().cloned() else {
            session.reset_selection();
            return Ok(SELECT_FIRST_REPLY.to_string());
        };

        let order_id = self
            .writer
            .create_order(restaurant.id, user_id, ORDER_STATUS_PENDING)
            .await
            .map_err(TurnError::Transaction)?;

        tracing::info!(
            order_id = %order_id,
            restaurant_id = restaurant.id,
            user_id,
            "Order created"
        );

        session.reset_selection();
        Ok(ORDER_SUCCESS_REPLY.to_string())
    }
}
