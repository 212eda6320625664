//! Authenticated encryption of a single chunk.
//!
//! Two AEAD algorithms are supported, selected per container:
//! AES-256-GCM (id 0) and ChaCha20-Poly1305 (id 1).  Both use 256-bit
//! keys, 96-bit nonces, and append a 128-bit tag to the ciphertext.
//! No associated data is bound to the chunks; tampering with the header
//! is caught by tag failures or the whole-plaintext hash.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;

use crate::errors::{Result, SkitaError};

use super::kdf::KEY_LEN;
use super::schedule::CHUNK_NONCE_LEN;

/// Size of the authentication tag appended to each chunk (128 bits).
pub const TAG_LEN: usize = 16;

/// The AEAD algorithm used for every chunk of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-256-GCM (container algorithm id 0, the default).
    AesGcm,
    /// ChaCha20-Poly1305 (container algorithm id 1).
    ChaCha20Poly1305,
}

impl Algorithm {
    /// The one-byte id stored in the container header.
    pub fn id(self) -> u8 {
        match self {
            Algorithm::AesGcm => 0,
            Algorithm::ChaCha20Poly1305 => 1,
        }
    }

    /// Look up an algorithm by its header id.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Algorithm::AesGcm),
            1 => Ok(Algorithm::ChaCha20Poly1305),
            other => Err(SkitaError::UnsupportedAlgorithm(other)),
        }
    }

    /// Human-readable name, as shown by `skita inspect`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AesGcm => "AES-256-GCM",
            Algorithm::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = SkitaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aes-gcm" | "aes-256-gcm" | "aes" => Ok(Algorithm::AesGcm),
            "chacha20-poly1305" | "chacha20poly1305" | "chacha" => {
                Ok(Algorithm::ChaCha20Poly1305)
            }
            other => Err(SkitaError::CommandFailed(format!(
                "unknown algorithm '{other}' — use aes-gcm or chacha20-poly1305"
            ))),
        }
    }
}

/// Encrypt one chunk, returning `ciphertext || 16-byte tag`.
///
/// Output length is always `plaintext.len() + TAG_LEN`.
pub fn seal(
    algorithm: Algorithm,
    key: &[u8; KEY_LEN],
    nonce: &[u8; CHUNK_NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::AesGcm => {
            let cipher = Aes256Gcm::new_from_slice(key)
                .map_err(|e| SkitaError::SealFailure(format!("invalid key length: {e}")))?;
            cipher
                .encrypt(aes_gcm::Nonce::from_slice(nonce), plaintext)
                .map_err(|e| SkitaError::SealFailure(format!("AES-GCM encryption error: {e}")))
        }
        Algorithm::ChaCha20Poly1305 => {
            let cipher = ChaCha20Poly1305::new_from_slice(key)
                .map_err(|e| SkitaError::SealFailure(format!("invalid key length: {e}")))?;
            cipher
                .encrypt(chacha20poly1305::Nonce::from_slice(nonce), plaintext)
                .map_err(|e| {
                    SkitaError::SealFailure(format!("ChaCha20-Poly1305 encryption error: {e}"))
                })
        }
    }
}

/// Decrypt one chunk produced by `seal`.
///
/// Any tag mismatch surfaces as `AuthFailure` — the engine cannot tell
/// a wrong password apart from corrupted ciphertext, so neither can we.
pub fn open(
    algorithm: Algorithm,
    key: &[u8; KEY_LEN],
    nonce: &[u8; CHUNK_NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_LEN {
        return Err(SkitaError::AuthFailure);
    }

    match algorithm {
        Algorithm::AesGcm => {
            let cipher =
                Aes256Gcm::new_from_slice(key).map_err(|_| SkitaError::AuthFailure)?;
            cipher
                .decrypt(aes_gcm::Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| SkitaError::AuthFailure)
        }
        Algorithm::ChaCha20Poly1305 => {
            let cipher =
                ChaCha20Poly1305::new_from_slice(key).map_err(|_| SkitaError::AuthFailure)?;
            cipher
                .decrypt(chacha20poly1305::Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| SkitaError::AuthFailure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0xA5; KEY_LEN];
    const NONCE: [u8; CHUNK_NONCE_LEN] = [0x3C; CHUNK_NONCE_LEN];

    #[test]
    fn seal_open_roundtrip_both_algorithms() {
        for algorithm in [Algorithm::AesGcm, Algorithm::ChaCha20Poly1305] {
            let sealed = seal(algorithm, &KEY, &NONCE, b"chunk payload").unwrap();
            let opened = open(algorithm, &KEY, &NONCE, &sealed).unwrap();
            assert_eq!(opened, b"chunk payload");
        }
    }

    #[test]
    fn sealed_length_is_plaintext_plus_tag() {
        let sealed = seal(Algorithm::AesGcm, &KEY, &NONCE, &[0u8; 100]).unwrap();
        assert_eq!(sealed.len(), 100 + TAG_LEN);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let sealed = seal(Algorithm::AesGcm, &KEY, &NONCE, b"secret").unwrap();
        let wrong_key = [0x00; KEY_LEN];
        assert!(matches!(
            open(Algorithm::AesGcm, &wrong_key, &NONCE, &sealed),
            Err(SkitaError::AuthFailure)
        ));
    }

    #[test]
    fn open_with_flipped_bit_fails() {
        let mut sealed = seal(Algorithm::ChaCha20Poly1305, &KEY, &NONCE, b"secret").unwrap();
        sealed[0] ^= 0x01;
        assert!(matches!(
            open(Algorithm::ChaCha20Poly1305, &KEY, &NONCE, &sealed),
            Err(SkitaError::AuthFailure)
        ));
    }

    #[test]
    fn open_with_truncated_input_fails() {
        assert!(open(Algorithm::AesGcm, &KEY, &NONCE, &[0u8; 5]).is_err());
    }

    #[test]
    fn algorithms_are_not_interchangeable() {
        // Same key and nonce, different primitive: the tag cannot verify.
        let sealed = seal(Algorithm::ChaCha20Poly1305, &KEY, &NONCE, b"payload").unwrap();
        assert!(matches!(
            open(Algorithm::AesGcm, &KEY, &NONCE, &sealed),
            Err(SkitaError::AuthFailure)
        ));
    }

    #[test]
    fn algorithm_id_roundtrip() {
        assert_eq!(Algorithm::from_id(0).unwrap(), Algorithm::AesGcm);
        assert_eq!(Algorithm::from_id(1).unwrap(), Algorithm::ChaCha20Poly1305);
        assert!(matches!(
            Algorithm::from_id(7),
            Err(SkitaError::UnsupportedAlgorithm(7))
        ));
    }

    #[test]
    fn algorithm_parses_from_cli_names() {
        assert_eq!("aes-gcm".parse::<Algorithm>().unwrap(), Algorithm::AesGcm);
        assert_eq!(
            "chacha20-poly1305".parse::<Algorithm>().unwrap(),
            Algorithm::ChaCha20Poly1305
        );
        assert!("rot13".parse::<Algorithm>().is_err());
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let sealed = seal(Algorithm::AesGcm, &KEY, &NONCE, b"").unwrap();
        assert_eq!(sealed.len(), TAG_LEN);
        assert_eq!(open(Algorithm::AesGcm, &KEY, &NONCE, &sealed).unwrap(), b"");
    }
}
