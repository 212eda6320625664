//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  Parameters are configurable via `Argon2Params`
//! (loaded from `.skita.toml` or sensible defaults) and are recorded in
//! the container header so decryption always uses the same settings.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{Result, SkitaError};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the master nonce in bytes (96 bits).
pub const MASTER_NONCE_LEN: usize = 12;

/// Length of the derived master secret in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the KDF fields stored in the container header, so
/// the exact same settings are replayed when a container is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).  The header stores this as a
    /// single byte, so values above 255 are rejected.
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Validate the parameters before touching the Argon2 library.
    ///
    /// Enforces minimums to prevent dangerously weak KDF settings and
    /// the one-byte parallelism limit imposed by the header layout.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(SkitaError::KdfFailure(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(SkitaError::KdfFailure(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(SkitaError::KdfFailure(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        if self.parallelism > 255 {
            return Err(SkitaError::KdfFailure(format!(
                "Argon2 parallelism must fit in one byte (got {})",
                self.parallelism
            )));
        }
        if self.memory_kib < 8 * self.parallelism {
            return Err(SkitaError::KdfFailure(
                "Argon2 memory_kib must be at least 8 * parallelism".into(),
            ));
        }
        Ok(())
    }
}

/// Derive a 32-byte master secret from a password and salt using Argon2id.
///
/// The same password + salt + params will always produce the same secret.
pub fn derive_master_secret(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    argon2_params: &Argon2Params,
) -> Result<MasterSecret> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| SkitaError::KdfFailure(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut secret = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut secret)
        .map_err(|e| SkitaError::KdfFailure(format!("Argon2id hashing failed: {e}")))?;

    let master = MasterSecret::new(secret);
    secret.zeroize();
    Ok(master)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Generate a cryptographically random 12-byte master nonce.
///
/// Only the first 8 bytes flow into the derived chunk nonces; the value
/// itself is never written to the container.
pub fn generate_master_nonce() -> [u8; MASTER_NONCE_LEN] {
    let mut nonce = [0u8; MASTER_NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    nonce
}

/// A wrapper around the 32-byte master secret that automatically zeroes
/// its memory when dropped.
///
/// Use this to hold the master secret in memory so it cannot linger
/// after an encrypt or decrypt call completes.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterSecret {
    bytes: [u8; KEY_LEN],
}

impl MasterSecret {
    /// Create a new `MasterSecret` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw secret bytes (e.g. to derive chunk keys).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
