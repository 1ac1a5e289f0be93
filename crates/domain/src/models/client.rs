//! Booking client domain model.

use uuid::Uuid;

use super::user::User;

/// Placeholder first name for clients created from accounts without one.
pub const DEFAULT_CLIENT_NAME: &str = "Usuario";

/// The identity fields client resolution needs. A resolved client is linked
/// 1:1 with its [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
}

impl ClientIdentity {
    /// Derives the client fields for a user, filling in placeholders for
    /// missing names.
    pub fn for_user(user: &User) -> Self {
        let nombre = match user.first_name.trim() {
            "" => DEFAULT_CLIENT_NAME.to_string(),
            name => name.to_string(),
        };

        Self {
            user_id: user.id,
            email: user.email.clone(),
            nombre,
            apellido: user.last_name.trim().to_string(),
        }
    }
}
