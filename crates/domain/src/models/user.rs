//! User identity domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A login account. The email doubles as the login name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data needed to create a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// Builds the last name from whichever naming convention the caller used.
    ///
    /// An explicit `last_name` wins; otherwise paternal and maternal surnames
    /// are joined with a single space.
    pub fn compose_last_name(
        last_name: Option<&str>,
        paternal: Option<&str>,
        maternal: Option<&str>,
    ) -> String {
        if let Some(last) = last_name.map(str::trim).filter(|s| !s.is_empty()) {
            return last.to_string();
        }
        let parts: Vec<&str> = [paternal, maternal]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        parts.join(" ")
    }
}
