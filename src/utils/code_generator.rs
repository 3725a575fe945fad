//! Deterministic short code derivation.
//!
//! A code is the first [`HASH_CODE_LENGTH`] characters of the uppercase hex
//! MD5 digest of the normalized URL. The same URL always yields the same
//! code, so shortening needs no lookup-then-generate step.
//!
//! The code space is 24 bits (about 16.7 million codes). Birthday collisions
//! become likely once the store holds a few thousand distinct URLs; the
//! assigner detects them and reports [`crate::error::AppError::HashCollision`].

use md5::{Digest, Md5};

/// Number of hex characters kept from the digest.
pub const HASH_CODE_LENGTH: usize = 6;

/// Derives the short code for an already-normalized URL.
pub fn hash_code(normalized_url: &str) -> String {
    let digest = Md5::digest(normalized_url.as_bytes());
    let mut code = hex::encode_upper(digest);
    code.truncate(HASH_CODE_LENGTH);
    code
}
