//! Argon2 password hashing.
//!
//! Only PHC strings (`$argon2id$v=19$...`) are ever stored. Verification goes
//! through `argon2`'s constant-time comparison.

use std::fmt;
use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

/// Errors raised while hashing or parsing password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The stored value is not a PHC string argon2 understands.
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
    /// Hashing a new password failed.
    #[error("failed to hash password: {0}")]
    Hashing(String),
}

/// Argon2 PHC string.
///
/// ## Invariants
/// - always parses as a [`password_hash::PasswordHash`] carrying a hash
///   output, so it can be verified against.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt and default argon2id
    /// parameters.
    pub fn hash(password: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordError::Hashing(err.to_string()))
    }

    /// Accept a PHC string read from storage.
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let phc = phc.into();
        let parsed = password_hash::PasswordHash::new(&phc)
            .map_err(|err| PasswordError::Malformed(err.to_string()))?;
        if parsed.hash.is_none() {
            return Err(PasswordError::Malformed("missing hash output".to_owned()));
        }
        Ok(Self(phc))
    }

    /// Check `password` against this hash.
    pub fn verify(&self, password: &str) -> bool {
        match password_hash::PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

static DUMMY_HASH: OnceLock<Option<PasswordHash>> = OnceLock::new();

/// Run a verification that always fails.
///
/// Used when no user matches a login attempt so that unknown emails cost the
/// same as wrong passwords.
pub fn verify_against_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| PasswordHash::hash("dummy-password-never-matches").ok());
    if let Some(hash) = dummy {
        let _ = hash.verify(password);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_verifies_original_password_only() {
        let hash = PasswordHash::hash("password").expect("hash password");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hash.verify("password"));
        assert!(!hash.verify("Password"));
        assert!(!hash.verify("password "));
    }

    #[rstest]
    fn salts_differ_between_hashes() {
        let first = PasswordHash::hash("password").expect("hash password");
        let second = PasswordHash::hash("password").expect("hash password");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("password")]
    #[case("$argon2id$broken")]
    #[case("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0")]
    fn parse_rejects_non_phc_values(#[case] raw: &str) {
        assert!(matches!(
            PasswordHash::parse(raw),
            Err(PasswordError::Malformed(_))
        ));
    }

    #[rstest]
    fn parse_accepts_stored_hash() {
        let hash = PasswordHash::hash("secret").expect("hash password");
        let reparsed = PasswordHash::parse(hash.as_str()).expect("parse hash");
        assert!(reparsed.verify("secret"));
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let hash = PasswordHash::hash("secret").expect("hash password");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
