//! Token generation.
//!
//! A token is the first three characters of the display name followed by
//! twelve hex characters of `SHA-256(secret_name_timestamp)`, all uppercase.
//! The timestamp has second resolution, so the function is deterministic
//! within a second; callers that need distinct tokens inside the same second
//! pass a non-zero `attempt`.

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{IdError, Result};

/// Number of hex characters kept from the digest.
pub const DIGEST_LEN: usize = 12;

/// Maximum number of name characters used as the token prefix.
pub const PREFIX_LEN: usize = 3;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Operator secret mixed into every token.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdError::MissingSecret);
        }
        Ok(Self(value))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

/// Mint the token for `name` at instant `at`.
pub fn generate_id(secret: &Secret, name: &str, at: NaiveDateTime) -> Result<String> {
    generate_id_with_attempt(secret, name, at, 0)
}

/// Like [`generate_id`], with a collision counter mixed into the hash input.
///
/// `attempt == 0` produces exactly the same token as [`generate_id`].
pub fn generate_id_with_attempt(
    secret: &Secret,
    name: &str,
    at: NaiveDateTime,
    attempt: u32,
) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(IdError::InvalidArgument("name must not be empty".to_string()));
    }

    let folded = trimmed.to_lowercase();
    let mut raw = format!(
        "{}_{}_{}",
        secret.expose(),
        folded,
        at.format(TIMESTAMP_FORMAT)
    );
    if attempt > 0 {
        raw.push('_');
        raw.push_str(&attempt.to_string());
    }

    let digest = hex::encode(Sha256::digest(raw.as_bytes()));
    let prefix: String = folded.chars().take(PREFIX_LEN).collect();

    Ok(format!(
        "{}{}",
        prefix.to_uppercase(),
        digest[..DIGEST_LEN].to_uppercase()
    ))
}

/// Canonical form of user-supplied IDs.
pub fn normalize_id(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Checks the token shape: up to three prefix characters taken from the
/// name followed by twelve uppercase hex digits. The prefix may hold any
/// printable character except lowercase letters, since names can contain
/// spaces or punctuation.
pub fn is_well_formed(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < DIGEST_LEN || chars.len() > DIGEST_LEN + PREFIX_LEN {
        return false;
    }

    let (prefix, digest) = chars.split_at(chars.len() - DIGEST_LEN);
    let prefix_ok = prefix
        .iter()
        .all(|c| !c.is_lowercase() && !c.is_control());
    let digest_ok = digest
        .iter()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(c));

    prefix_ok && digest_ok
}
