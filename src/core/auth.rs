//! Authentication business logic - password hashing and bearer sessions.
//!
//! Passwords are hashed with Argon2 (PHC string format) at registration and
//! verified at login. A successful login issues an opaque bearer token - a
//! random UUID stored in the sessions table - which request handlers resolve
//! back to a user via [`authenticate`]. The credential carries no claims; it
//! is opaque by design.

use crate::{
    entities::{Session, User, session},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use sea_orm::{Set, prelude::*};
use uuid::Uuid;

/// Minimum accepted password length, matching the original registration form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hashes a password with Argon2 and a fresh random salt.
///
/// # Errors
/// * [`Error::InvalidCredentials`] - password shorter than [`MIN_PASSWORD_LEN`]
/// * [`Error::PasswordHash`] - hasher failure
pub fn hash_password(password: &str) -> Result<String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidCredentials);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })
}

/// Verifies a candidate password against a stored PHC hash string.
///
/// Returns `Ok(false)` for a wrong password; errors are reserved for
/// operational failures such as a corrupt stored hash.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| Error::PasswordHash {
        message: format!("Stored hash is malformed: {e}"),
    })?;

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHash {
            message: e.to_string(),
        }),
    }
}

/// Authenticates an email/password pair and issues a new session token.
///
/// Fails with [`Error::InvalidCredentials`] for an unknown email or a wrong
/// password - indistinguishable to the caller.
pub async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<session::Model> {
    let email = email.trim().to_lowercase();
    let user = crate::core::user::get_user_by_email(db, &email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let model = session::ActiveModel {
        token: Set(Uuid::new_v4().to_string()),
        user_id: Set(user.id),
        created_at: Set(chrono::Utc::now()),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Resolves a bearer token to the user it belongs to.
///
/// Fails with [`Error::Unauthorized`] for unknown or revoked tokens.
pub async fn authenticate(
    db: &DatabaseConnection,
    token: &str,
) -> Result<crate::entities::user::Model> {
    let session = Session::find_by_id(token)
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)?;

    User::find_by_id(session.user_id)
        .one(db)
        .await?
        .ok_or(Error::Unauthorized)
}

/// Revokes a session token. Revoking an already-unknown token is a no-op.
pub async fn logout(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_by_id(token).exec(db).await?;
    Ok(())
}
