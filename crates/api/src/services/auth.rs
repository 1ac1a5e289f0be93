//! Authentication service for registration, login, and token management.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use domain::models::{ClientIdentity, NewUser, User};
use persistence::error::{constraint_violation, constraints};
use persistence::repositories::{ClientRepository, UserRepository};
use shared::jwt::{JwtConfig, JwtError, TokenPair};
use shared::password::{hash_password, verify_password_or_dummy, PasswordError};
use shared::validation::{
    error_message, normalize_email, validate_email, validate_password_length,
};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Email already registered.")]
    EmailAlreadyExists,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("User is disabled.")]
    UserDisabled,

    #[error("Invalid or expired refresh token.")]
    InvalidRefreshToken,

    #[error("User not found.")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Data accepted by [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub tokens: TokenPair,
    pub cliente_id: i64,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    clients: ClientRepository,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            clients: ClientRepository::new(pool),
            jwt,
        }
    }

    /// Creates an account and its linked client. Returns the client id.
    ///
    /// Checks run in order: email, password confirmation, password length,
    /// then email uniqueness.
    pub async fn register(&self, registration: Registration) -> Result<i64, AuthError> {
        let email = normalize_email(&registration.email);
        validate_email(&email).map_err(|e| AuthError::Validation(error_message(&e)))?;

        if registration.password != registration.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password_length(&registration.password)
            .map_err(|e| AuthError::Validation(error_message(&e)))?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&registration.password)?;

        let new_user = NewUser {
            email,
            password_hash,
            first_name: registration.first_name.trim().to_string(),
            last_name: registration.last_name.trim().to_string(),
        };

        let user = match self.users.create_user(&new_user).await {
            Ok(user) => User::from(user),
            // Lost a race with a concurrent registration for the same email.
            Err(e)
                if constraint_violation(&e)
                    .is_some_and(|v| v.is_unique_on(constraints::USERS_EMAIL_KEY)) =>
            {
                return Err(AuthError::EmailAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        };

        let cliente_id = self
            .clients
            .resolve_for_user(&ClientIdentity::for_user(&user))
            .await?;

        info!(user_id = %user.id, cliente_id, "User registered");
        Ok(cliente_id)
    }

    /// Verifies credentials and issues a token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = normalize_email(email);
        let user = if email.is_empty() {
            None
        } else {
            self.users.find_by_email(&email).await?.map(User::from)
        };

        let hash = user.as_ref().and_then(|u| u.password_hash.as_deref());
        if !verify_password_or_dummy(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        let user = user.ok_or(AuthError::InvalidCredentials)?;
        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        self.users.update_last_login(user.id, Utc::now()).await?;
        let tokens = self.jwt.issue_pair(user.id)?;
        let cliente_id = self
            .clients
            .resolve_for_user(&ClientIdentity::for_user(&user))
            .await?;

        info!(user_id = %user.id, cliente_id, "User logged in");
        Ok(LoginResult { tokens, cliente_id })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;
        let user_id = claims
            .user_id()
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;
        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        Ok(self.jwt.generate_access_token(user_id)?)
    }

    /// Loads the caller's account and client id.
    pub async fn current_user(&self, user_id: Uuid) -> Result<(User, i64), AuthError> {
        let user: User = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?
            .into();
        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let cliente_id = self
            .clients
            .resolve_for_user(&ClientIdentity::for_user(&user))
            .await?;
        Ok((user, cliente_id))
    }

    /// Resolves the client id of an authenticated user.
    pub async fn client_for_user(&self, user_id: Uuid) -> Result<i64, AuthError> {
        self.current_user(user_id).await.map(|(_, cliente_id)| cliente_id)
    }

    pub fn access_token_expiry_secs(&self) -> i64 {
        self.jwt.access_token_expiry_secs
    }
}
