//! The `.skita` container format.
//!
//! This module provides:
//! - Header serialization and parsing, including both legacy header
//!   shapes (`header`)
//! - Chunk record framing (`record`)
//!
//! The format itself: a fixed header (magic, version, algorithm, KDF
//! parameters, salt, sizes, filename, plaintext hash) followed by one
//! framed record per chunk.  All integers are big-endian.

pub mod header;
pub mod record;

// Re-export the most commonly used items.
pub use header::{Header, HASH_LEN, KDF_ARGON2ID, MAGIC, VERSION_V1, VERSION_V2};
pub use record::{write_record, RecordReader, RECORD_PREFIX_LEN};

/// Suggested extension for container files.
pub const EXTENSION: &str = "skita";

/// Default cleartext bytes per chunk (4 MiB).
pub const DEFAULT_CHUNK_SIZE: u32 = 4 * 1024 * 1024;
