//! Cryptographic primitives for Skita.
//!
//! This module provides:
//! - Argon2id password-based key derivation (`kdf`)
//! - The per-chunk subkey/nonce schedule (`schedule`)
//! - AEAD sealing and opening of individual chunks (`aead`)

pub mod aead;
pub mod kdf;
pub mod schedule;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_master_secret, seal, open, ...};
pub use aead::{open, seal, Algorithm, TAG_LEN};
pub use kdf::{
    derive_master_secret, generate_master_nonce, generate_salt, Argon2Params, MasterSecret,
    KEY_LEN, MASTER_NONCE_LEN, SALT_LEN,
};
pub use schedule::{derive_chunk_key, derive_chunk_nonce, CHUNK_NONCE_LEN};
