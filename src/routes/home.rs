//! Handler for the welcome page.

use axum::Json;
use serde::Serialize;

use crate::config::WELCOME_MESSAGE;

/// Body of `GET /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WelcomeMessage {
    pub message: &'static str,
}

impl WelcomeMessage {
    pub const fn welcome() -> Self {
        Self {
            message: WELCOME_MESSAGE,
        }
    }
}

/// Welcome handler.
pub async fn index() -> Json<WelcomeMessage> {
    Json(WelcomeMessage::welcome())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_returns_welcome_message() {
        let Json(body) = index().await;
        assert_eq!(body.message, "Welcome to Flask Docker App");
    }

    #[test]
    fn serializes_with_message_key() {
        let value = serde_json::to_value(WelcomeMessage::welcome()).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Welcome to Flask Docker App" }));
    }
}
