//! Password hashing with Argon2id.
//!
//! Account passwords are stored as PHC strings produced by Argon2id with the
//! OWASP 2024 parameters. Verification reads the parameters back out of the
//! stored hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Argon2id parameters (OWASP 2024).
/// - Memory: 19456 KiB (19 MiB)
/// - Iterations: 2
/// - Parallelism: 1
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32; // 256-bit hash output

/// Creates the Argon2id hasher used for new hashes.
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// The PHC string carries the algorithm, parameters and salt, so it can be
/// verified without any other configuration.
///
/// # Arguments
/// * `password` - The plaintext password to hash
///
/// # Returns
/// * `Ok(String)` - PHC-formatted hash string
/// * `Err(PasswordError)` - If the hasher cannot be built or hashing fails
///
/// # Example
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("secret1").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// assert_ne!(hash, hash_password("secret1").unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// The parameters embedded in the hash are used, so hashes created with older
/// parameters keep verifying after the constants change.
///
/// # Arguments
/// * `password` - The plaintext password to verify
/// * `hash` - The PHC-formatted hash to verify against
///
/// # Returns
/// * `Ok(true)` - Password matches
/// * `Ok(false)` - Password does not match
/// * `Err(PasswordError)` - If the hash is malformed or verification fails
///
/// # Example
/// ```
/// use shared::password::{hash_password, verify_password};
///
/// let hash = hash_password("secret1").unwrap();
/// assert!(verify_password("secret1", &hash).unwrap());
/// assert!(!verify_password("secret2", &hash).unwrap());
/// assert!(verify_password("secret1", "not-a-hash").is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Verifies a password against an optional stored hash.
///
/// When there is no account (or no hash), a verification against a dummy hash
/// still runs so unknown emails take as long as wrong passwords.
///
/// # Returns
/// * `Ok(true)` - A hash was given and the password matches it
/// * `Ok(false)` - No hash, or the password does not match
/// * `Err(PasswordError)` - The given hash is malformed
///
/// # Example
/// ```
/// use shared::password::{hash_password, verify_password_or_dummy};
///
/// let hash = hash_password("secret1").unwrap();
/// assert!(verify_password_or_dummy("secret1", Some(&hash)).unwrap());
/// assert!(!verify_password_or_dummy("secret1", None).unwrap());
/// ```
pub fn verify_password_or_dummy(password: &str, hash: Option<&str>) -> Result<bool, PasswordError> {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let dummy = DUMMY_HASH.get_or_init(|| hash_password("dummy-password").ok());
            if let Some(dummy) = dummy {
                let _ = verify_password(password, dummy);
            }
            Ok(false)
        }
    }
}
