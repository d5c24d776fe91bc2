/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: liveness and store connectivity
/// - `auth`: register, login, refresh
/// - `projects`: owner-scoped project CRUD
/// - `tasks`: task CRUD authorized through the parent project

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

/// Body of a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
