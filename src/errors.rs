use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Skita.
#[derive(Debug, Error)]
pub enum SkitaError {
    // --- Container parsing errors ---
    #[error("Not a skita container — magic bytes missing")]
    BadMagic,

    #[error("Unsupported container version {0:#06x}")]
    UnsupportedVersion(u16),

    #[error("Unsupported encryption algorithm id {0}")]
    UnsupportedAlgorithm(u8),

    #[error("Unsupported key derivation function id {0}")]
    UnsupportedKdf(u8),

    #[error("Malformed container: {0}")]
    MalformedHeader(String),

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KdfFailure(String),

    #[error("Encryption failed: {0}")]
    SealFailure(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    AuthFailure,

    #[error("Integrity check failed — decrypted content does not match the stored hash")]
    IntegrityFailure,

    // --- Input validation errors ---
    #[error("Input too large: {0}")]
    InputTooLarge(String),

    // --- Pipeline errors ---
    #[error("Operation cancelled")]
    Cancelled,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Output file already exists: {0} (use --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    #[error("History error: {0}")]
    HistoryError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Skita results.
pub type Result<T> = std::result::Result<T, SkitaError>;
