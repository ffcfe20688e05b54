//! Password hashing and credential verification.
//!
//! Passwords are stored as Argon2id PHC strings with a fresh random salt per
//! hash, so equal passwords never produce equal hashes and verification is
//! constant-time. The login check looks the account up by exact username and
//! verifies the supplied password against the stored hash; it reports nothing
//! more specific than "no match" either way.

use crate::db::users::Users;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::msg_error_anyhow;
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes a password into an Argon2id PHC string.
///
/// The salt is random per call; two hashes of the same password differ and
/// both verify.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| msg_error_anyhow!(Message::PasswordHashFailed(e.to_string())))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; a hash that cannot be parsed is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| msg_error_anyhow!(Message::PasswordHashFailed(e.to_string())))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(msg_error_anyhow!(Message::PasswordHashFailed(e.to_string()))),
    }
}

/// Checks login credentials against the default database.
///
/// Returns `None` when the username is unknown or the password does not
/// match. The session carries the approval flag; callers decide whether an
/// unapproved account may proceed past the login screen.
pub fn check_login(username: &str, password: &str) -> Result<Option<Session>> {
    check_login_with(&mut Users::new()?, username, password)
}

/// [`check_login`] against an explicit user directory.
pub fn check_login_with(users: &mut Users, username: &str, password: &str) -> Result<Option<Session>> {
    let user = match users.find_by_username(username)? {
        Some(user) => user,
        None => return Ok(None),
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(None);
    }

    Ok(Some(Session {
        // Stored rows always carry an id
        user_id: user.id.unwrap_or_default(),
        role: user.role,
        approved: user.approved,
        full_name: user.full_name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted() {
        let hash1 = hash_password("hunter2").unwrap();
        let hash2 = hash_password("hunter2").unwrap();
        assert_ne!(hash1, hash2);
        assert!(hash1.starts_with("$argon2id$"));
    }

    #[test]
    fn verify_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("hunter2", "not-a-phc-string").is_err());
    }
}
