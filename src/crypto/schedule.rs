//! Per-chunk key and nonce schedule.
//!
//! Every chunk is sealed under its own subkey and nonce so that no
//! single (key, nonce) pair ever protects more than one chunk:
//!
//! ```text
//! chunk_key(i)   = SHA-256(master_secret || "chunk-<i>")      (i in decimal)
//! chunk_nonce(i) = master_nonce[0..8] || be32(i)
//! ```
//!
//! Both functions are pure: the container format depends on this exact
//! construction, so a container written on one machine decrypts on any
//! other given the same password.

use sha2::{Digest, Sha256};

use super::kdf::{KEY_LEN, MASTER_NONCE_LEN};

/// Length of a derived chunk nonce in bytes (96 bits).
pub const CHUNK_NONCE_LEN: usize = MASTER_NONCE_LEN;

/// Derive the 32-byte subkey for chunk `index`.
///
/// The index is rendered in minimal decimal ASCII, so chunk 0 hashes
/// `master || "chunk-0"`, chunk 10 hashes `master || "chunk-10"`.
pub fn derive_chunk_key(master: &[u8; KEY_LEN], index: u32) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(master);
    hasher.update(format!("chunk-{index}").as_bytes());
    hasher.finalize().into()
}

/// Derive the 12-byte nonce for chunk `index`.
///
/// The first 8 bytes come from the per-encryption master nonce; the last
/// 4 are the big-endian chunk index, which makes nonces pairwise distinct
/// within one container.
pub fn derive_chunk_nonce(
    master_nonce: &[u8; MASTER_NONCE_LEN],
    index: u32,
) -> [u8; CHUNK_NONCE_LEN] {
    let mut nonce = [0u8; CHUNK_NONCE_LEN];
    nonce[..8].copy_from_slice(&master_nonce[..8]);
    nonce[8..].copy_from_slice(&index.to_be_bytes());
    nonce
}
