//! Core dialog state machine
//!
//! Interprets each inbound text turn against the conversation's session
//! state, performs any catalog reads or transaction writes the turn calls
//! for, and produces the outbound reply plus the updated session state.

pub mod intent;
pub mod state;
mod traits;
mod turn;

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod proptests;

pub use intent::{classify, Intent};
pub use state::SessionState;
pub use traits::{CatalogReader, DatabaseStore, SessionStore, TransactionWriter};
pub use turn::{DialogEngine, TurnError};
