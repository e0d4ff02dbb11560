//! Intent classification for inbound turns
//!
//! A fixed substring/keyword cascade, evaluated top to bottom with first
//! match winning. Not a grammar: "this is fine" greets because it
//! contains "hi".

/// What the user asked for this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A numeric pick against the most recent listing (only produced
    /// while a selection is being awaited)
    Select { raw: String },
    Greet,
    ListRestaurants,
    MakeReservation,
    PlaceOrder,
    Unknown,
}

/// Classify one inbound message against the current dialog mode.
///
/// The numeric check runs first, and only while a selection is being
/// awaited; everything after it is case-insensitive substring matching.
pub fn classify(expecting_selection: bool, text: &str) -> Intent {
    if expecting_selection && is_all_digits(text) {
        return Intent::Select {
            raw: text.to_string(),
        };
    }

    let lower = text.to_lowercase();
    if lower.contains("hi") || lower.contains("hello") {
        Intent::Greet
    } else if lower.contains("find restaurants") || lower.contains("view menu") {
        Intent::ListRestaurants
    } else if lower.contains("make reservation") {
        Intent::MakeReservation
    } else if lower.contains("place order") {
        Intent::PlaceOrder
    } else {
        Intent::Unknown
    }
}

/// Equivalent of `^\d+$`: non-empty, ASCII digits only, no trimming
fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
