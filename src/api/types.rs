//! API request and response types

use serde::{Deserialize, Serialize};

/// Inbound turn delivered by the transport
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub conversation_id: String,
    pub user_id: String,
    pub text: String,
}

/// Outbound reply for a turn
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub reply: String,
}

/// Version info
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}
