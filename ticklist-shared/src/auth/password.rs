/// Password hashing using Argon2id
///
/// Passwords are only ever stored as salted one-way hashes in PHC string
/// format; the salt is generated per password from the OS RNG and embedded
/// in the hash, so verification needs no extra state.
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
///
/// assert!(verify_password("correct horse battery staple", &hash)?);
/// assert!(!verify_password("wrong password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using Argon2id with a fresh random salt
///
/// Returns a PHC string (`$argon2id$v=19$...`) that embeds the algorithm
/// parameters and salt alongside the hash.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Returns `Ok(false)` for a wrong password; errors are reserved for
/// malformed hashes and other unexpected failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are embedded in the hash; comparison is constant-time.
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}
