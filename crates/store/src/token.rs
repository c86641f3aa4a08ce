//! Share and admin token handling.
//!
//! A share token addresses a calculation in URLs. An admin token grants edit
//! access; only its SHA-256 hash reaches the database.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

// 9 bytes encode to 12 URL-safe characters, 32 bytes to 43.
const SHARE_TOKEN_BYTES: usize = 9;
const ADMIN_TOKEN_BYTES: usize = 32;

/// Generate a new share token (12 URL-safe characters).
pub(crate) fn new_share_token() -> String {
    random_token(SHARE_TOKEN_BYTES)
}

/// Generate a new admin token (43 URL-safe characters).
pub(crate) fn new_admin_token() -> String {
    random_token(ADMIN_TOKEN_BYTES)
}

fn random_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 of a token, lowercase hex.
pub(crate) fn hash_token(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Constant-time check of a candidate token against a stored hash.
pub(crate) fn verify_token(candidate: &str, stored_hash: &str) -> bool {
    let candidate_hash = hash_token(candidate);
    let candidate_hash = candidate_hash.as_bytes();
    let stored_hash = stored_hash.as_bytes();
    if candidate_hash.len() != stored_hash.len() {
        // ct_eq requires equal lengths; still burn a comparison.
        let _ = stored_hash.ct_eq(stored_hash);
        return false;
    }
    candidate_hash.ct_eq(stored_hash).into()
}
