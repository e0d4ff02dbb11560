//! Per-conversation session state

use crate::db::Restaurant;
use serde::{Deserialize, Serialize};

/// Dialog state persisted between turns of one conversation
///
/// A conversation has no state before its first turn; the all-absent
/// record is the implicit starting point, so every field defaults and the
/// record deserializes from `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// True only while the engine has just listed restaurants and is
    /// waiting for a numeric pick
    #[serde(default)]
    pub expecting_selection: bool,

    /// The exact rows shown to the user, frozen at listing time so a later
    /// numeric reply resolves by position rather than by re-query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listed_restaurants: Vec<Restaurant>,

    /// Index into `listed_restaurants` of the restaurant the user has
    /// committed to via a valid numeric pick
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
}

impl SessionState {
    /// Return to the idle selection state: not awaiting a pick, no
    /// committed restaurant
    pub fn reset_selection(&mut self) {
        self.expecting_selection = false;
        self.selected_index = None;
    }

    /// The committed restaurant, if `selected_index` is present and still
    /// valid against the stored listing
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected_index
            .and_then(|i| self.listed_restaurants.get(i))
    }
}
