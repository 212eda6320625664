//! Binary `.skita` container header.
//!
//! All multi-byte integers are big-endian.  Layout:
//!
//! ```text
//! offset  size  field
//!      0     4  magic "SKTA"
//!      4     2  format version (0x0001 legacy, 0x0002 current)
//!      6     1  algorithm id (0 = AES-256-GCM, 1 = ChaCha20-Poly1305)
//!      7     1  KDF id (0 = Argon2id)
//!      8     4  KDF memory cost (KiB)
//!     12     4  KDF iterations
//!     16     1  KDF parallelism
//!     17    32  salt
//!     49     4  chunk size (bytes of cleartext per chunk)
//!     53     4  original size (bytes)
//!     57     4  total chunks
//!     61     2  filename length F (UTF-8 bytes)
//!     63     F  filename (UTF-8, not NUL-terminated)
//!   63+F    32  SHA-256 of the whole plaintext (v2 only)
//! ```
//!
//! The legacy producer shipped two header shapes under version 0x0001:
//! with and without the trailing hash.  We write 0x0002 (hash mandatory)
//! and accept 0x0001 either way, inferring hash presence from the byte
//! count left over after the chunk records are accounted for.

use crate::crypto::aead::Algorithm;
use crate::crypto::kdf::{Argon2Params, SALT_LEN};
use crate::errors::{Result, SkitaError};

/// Magic bytes at the start of every container.
pub const MAGIC: &[u8; 4] = b"SKTA";

/// Legacy format version (hash optional, shipped both ways).
pub const VERSION_V1: u16 = 0x0001;

/// Current format version (hash mandatory).
pub const VERSION_V2: u16 = 0x0002;

/// KDF id for Argon2id, the only KDF defined so far.
pub const KDF_ARGON2ID: u8 = 0;

/// Length of the stored plaintext hash (SHA-256).
pub const HASH_LEN: usize = 32;

/// Fixed-size portion of the header: everything before the filename.
pub const FIXED_LEN: usize = 63;

/// Maximum filename length in bytes (the length field is a u16).
pub const MAX_FILENAME_LEN: usize = u16::MAX as usize;

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format version as stored on disk.
    pub version: u16,

    /// AEAD algorithm used for every chunk.
    pub algorithm: Algorithm,

    /// Argon2id parameters used to derive the master secret.
    pub argon2: Argon2Params,

    /// Salt fed to the KDF, generated fresh per encryption.
    pub salt: [u8; SALT_LEN],

    /// Cleartext bytes per chunk (the final chunk may be shorter).
    pub chunk_size: u32,

    /// Total plaintext length in bytes.
    pub original_size: u32,

    /// Number of chunk records following the header.
    pub total_chunks: u32,

    /// Original filename, stored verbatim.  Never interpreted as a
    /// path; callers sanitize before writing to disk.
    pub filename: String,

    /// SHA-256 of the whole plaintext.  `None` only for hashless v1
    /// containers, which skip the final integrity check.
    pub plaintext_hash: Option<[u8; HASH_LEN]>,
}

impl Header {
    /// Build a current-version (v2) header with a mandatory hash.
    pub fn new(
        algorithm: Algorithm,
        argon2: Argon2Params,
        salt: [u8; SALT_LEN],
        chunk_size: u32,
        original_size: u32,
        total_chunks: u32,
        filename: &str,
        plaintext_hash: [u8; HASH_LEN],
    ) -> Result<Self> {
        if filename.len() > MAX_FILENAME_LEN {
            return Err(SkitaError::InputTooLarge(format!(
                "filename is {} bytes, maximum is {MAX_FILENAME_LEN}",
                filename.len()
            )));
        }
        Ok(Self {
            version: VERSION_V2,
            algorithm,
            argon2,
            salt,
            chunk_size,
            original_size,
            total_chunks,
            filename: filename.to_string(),
            plaintext_hash: Some(plaintext_hash),
        })
    }

    /// Serialized length of this header in bytes.
    pub fn serialized_len(&self) -> usize {
        let hash_len = if self.plaintext_hash.is_some() {
            HASH_LEN
        } else {
            0
        };
        FIXED_LEN + self.filename.len() + hash_len
    }

    /// Total byte length of the chunk records that follow this header.
    ///
    /// Each record is 4 (length) + 12 (nonce) + cleartext + 16 (tag),
    /// and the cleartext lengths sum to `original_size`.
    pub fn body_len(&self) -> u64 {
        u64::from(self.original_size) + 32 * u64::from(self.total_chunks)
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.filename.len() > MAX_FILENAME_LEN {
            return Err(SkitaError::InputTooLarge(format!(
                "filename is {} bytes, maximum is {MAX_FILENAME_LEN}",
                self.filename.len()
            )));
        }
        self.argon2.validate()?;

        let mut buf = Vec::with_capacity(self.serialized_len());

        buf.extend_from_slice(MAGIC); // 4 bytes
        buf.extend_from_slice(&self.version.to_be_bytes()); // 2 bytes
        buf.push(self.algorithm.id()); // 1 byte
        buf.push(KDF_ARGON2ID); // 1 byte
        buf.extend_from_slice(&self.argon2.memory_kib.to_be_bytes()); // 4 bytes
        buf.extend_from_slice(&self.argon2.iterations.to_be_bytes()); // 4 bytes
        buf.push(self.argon2.parallelism as u8); // 1 byte
        buf.extend_from_slice(&self.salt); // 32 bytes
        buf.extend_from_slice(&self.chunk_size.to_be_bytes()); // 4 bytes
        buf.extend_from_slice(&self.original_size.to_be_bytes()); // 4 bytes
        buf.extend_from_slice(&self.total_chunks.to_be_bytes()); // 4 bytes
        buf.extend_from_slice(&(self.filename.len() as u16).to_be_bytes()); // 2 bytes
        buf.extend_from_slice(self.filename.as_bytes()); // F bytes

        if let Some(hash) = &self.plaintext_hash {
            buf.extend_from_slice(hash); // 32 bytes
        }

        Ok(buf)
    }

    /// Parse a header from the front of a container.
    ///
    /// `data` must be the full container (or at least enough of it that
    /// the total length is known): for legacy v1 headers the presence of
    /// the trailing hash is inferred by comparing the bytes remaining
    /// after the filename against the expected chunk-record body size.
    ///
    /// Returns the header and the offset of the first chunk record.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < 4 {
            return Err(SkitaError::BadMagic);
        }
        if &data[0..4] != MAGIC {
            return Err(SkitaError::BadMagic);
        }
        if data.len() < FIXED_LEN {
            return Err(SkitaError::MalformedHeader(
                "file too small to hold a container header".into(),
            ));
        }

        let version = u16::from_be_bytes([data[4], data[5]]);
        if version != VERSION_V1 && version != VERSION_V2 {
            return Err(SkitaError::UnsupportedVersion(version));
        }

        let algorithm = Algorithm::from_id(data[6])?;

        let kdf_id = data[7];
        if kdf_id != KDF_ARGON2ID {
            return Err(SkitaError::UnsupportedKdf(kdf_id));
        }

        let memory_kib = read_be32(data, 8);
        let iterations = read_be32(data, 12);
        let parallelism = u32::from(data[16]);

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[17..49]);

        let chunk_size = read_be32(data, 49);
        let original_size = read_be32(data, 53);
        let total_chunks = read_be32(data, 57);

        if chunk_size == 0 {
            return Err(SkitaError::MalformedHeader(
                "chunk size must not be zero".into(),
            ));
        }
        let expected_chunks = (u64::from(original_size)).div_ceil(u64::from(chunk_size));
        if u64::from(total_chunks) != expected_chunks {
            return Err(SkitaError::MalformedHeader(format!(
                "chunk count {total_chunks} does not match original size {original_size} \
                 at chunk size {chunk_size}"
            )));
        }

        let filename_len = usize::from(u16::from_be_bytes([data[61], data[62]]));
        let filename_end = FIXED_LEN + filename_len;
        if filename_end > data.len() {
            return Err(SkitaError::MalformedHeader(format!(
                "filename length {filename_len} extends past the available bytes"
            )));
        }
        let filename = std::str::from_utf8(&data[FIXED_LEN..filename_end])
            .map_err(|_| SkitaError::MalformedHeader("filename is not valid UTF-8".into()))?
            .to_string();

        // v2 requires the hash; v1 may or may not carry one.  The chunk
        // records occupy a known number of bytes, so whatever is left
        // beyond them tells us which shape this container has.
        let body_len = u64::from(original_size) + 32 * u64::from(total_chunks);
        let after_filename = (data.len() - filename_end) as u64;
        let has_hash = match version {
            VERSION_V2 => {
                if after_filename < HASH_LEN as u64 + body_len {
                    return Err(SkitaError::MalformedHeader(
                        "v2 container is missing its plaintext hash or chunk data".into(),
                    ));
                }
                true
            }
            _ => {
                if after_filename == HASH_LEN as u64 + body_len {
                    true
                } else if after_filename == body_len {
                    false
                } else {
                    return Err(SkitaError::MalformedHeader(format!(
                        "container length does not match {total_chunks} chunk records \
                         of {original_size} total cleartext bytes"
                    )));
                }
            }
        };

        let (plaintext_hash, header_end) = if has_hash {
            let mut hash = [0u8; HASH_LEN];
            hash.copy_from_slice(&data[filename_end..filename_end + HASH_LEN]);
            (Some(hash), filename_end + HASH_LEN)
        } else {
            (None, filename_end)
        };

        Ok((
            Header {
                version,
                algorithm,
                argon2: Argon2Params {
                    memory_kib,
                    iterations,
                    parallelism,
                },
                salt,
                chunk_size,
                original_size,
                total_chunks,
                filename,
                plaintext_hash,
            },
            header_end,
        ))
    }
}

/// Read a big-endian u32 at `offset` (caller has bounds-checked).
fn read_be32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header::new(
            Algorithm::AesGcm,
            Argon2Params::default(),
            [0x11; SALT_LEN],
            64,
            5,
            1,
            "hello.txt",
            [0x22; HASH_LEN],
        )
        .unwrap()
    }

    /// Pad a serialized header with a fake record body so `from_bytes`
    /// can resolve the v1/v2 shape from the total length.
    fn with_body(header: &Header, mut bytes: Vec<u8>) -> Vec<u8> {
        bytes.resize(bytes.len() + header.body_len() as usize, 0);
        bytes
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let header = sample_header();
        let bytes = with_body(&header, header.to_bytes().unwrap());

        let (parsed, offset) = Header::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(offset, header.serialized_len());
    }

    #[test]
    fn fixed_layout_offsets() {
        let header = sample_header();
        let bytes = header.to_bytes().unwrap();

        assert_eq!(&bytes[0..4], b"SKTA");
        assert_eq!(&bytes[4..6], &[0x00, 0x02]); // version
        assert_eq!(bytes[6], 0); // AES-GCM
        assert_eq!(bytes[7], 0); // Argon2id
        assert_eq!(&bytes[8..12], &65_536u32.to_be_bytes()); // memory
        assert_eq!(&bytes[12..16], &3u32.to_be_bytes()); // iterations
        assert_eq!(bytes[16], 4); // parallelism
        assert_eq!(&bytes[49..53], &64u32.to_be_bytes()); // chunk size
        assert_eq!(&bytes[53..57], &5u32.to_be_bytes()); // original size
        assert_eq!(&bytes[57..61], &1u32.to_be_bytes()); // total chunks
        assert_eq!(&bytes[61..63], &9u16.to_be_bytes()); // filename len
        assert_eq!(&bytes[63..72], b"hello.txt");
        assert_eq!(bytes.len(), 63 + 9 + 32);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        bytes[0] = 0x00;

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::BadMagic)
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        bytes[5] = 0x09;

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::UnsupportedVersion(0x0009))
        ));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        bytes[6] = 42;

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::UnsupportedAlgorithm(42))
        ));
    }

    #[test]
    fn unknown_kdf_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        bytes[7] = 1;

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::UnsupportedKdf(1))
        ));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        bytes[49..53].copy_from_slice(&0u32.to_be_bytes());

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn filename_past_end_is_rejected() {
        let header = sample_header();
        let mut bytes = header.to_bytes().unwrap();
        // Claim a filename far longer than the buffer.
        bytes[61..63].copy_from_slice(&60_000u16.to_be_bytes());

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn legacy_v1_without_hash_parses() {
        let mut header = sample_header();
        header.version = VERSION_V1;
        header.plaintext_hash = None;
        let bytes = with_body(&header, header.to_bytes().unwrap());

        let (parsed, offset) = Header::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.version, VERSION_V1);
        assert_eq!(parsed.plaintext_hash, None);
        assert_eq!(offset, FIXED_LEN + 9);
    }

    #[test]
    fn legacy_v1_with_hash_parses() {
        // The legacy producer also wrote hash-bearing containers under
        // version 0x0001; the extra 32 bytes identify them.
        let mut header = sample_header();
        header.version = VERSION_V1;
        let bytes = with_body(&header, header.to_bytes().unwrap());

        let (parsed, offset) = Header::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.plaintext_hash, Some([0x22; HASH_LEN]));
        assert_eq!(offset, FIXED_LEN + 9 + HASH_LEN);
    }

    #[test]
    fn v2_missing_hash_is_rejected() {
        let header = sample_header();
        let bytes = header.to_bytes().unwrap();
        // Header only — no hash body space and no records.
        let truncated = &bytes[..FIXED_LEN + 9];

        assert!(matches!(
            Header::from_bytes(truncated),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn inconsistent_chunk_count_is_rejected() {
        let header = sample_header();
        let mut bytes = with_body(&header, header.to_bytes().unwrap());
        // 5 bytes at chunk size 64 needs exactly 1 chunk, not 3.
        bytes[57..61].copy_from_slice(&3u32.to_be_bytes());

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn unicode_filename_roundtrips() {
        let header = Header::new(
            Algorithm::ChaCha20Poly1305,
            Argon2Params::default(),
            [0u8; SALT_LEN],
            16,
            3,
            1,
            "笔记.md",
            [0u8; HASH_LEN],
        )
        .unwrap();
        assert_eq!(header.filename.len(), 10); // UTF-8 byte length

        let bytes = with_body(&header, header.to_bytes().unwrap());
        let (parsed, _) = Header::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.filename, "笔记.md");
    }

    #[test]
    fn oversized_filename_is_rejected_at_construction() {
        let long_name = "x".repeat(MAX_FILENAME_LEN + 1);
        let result = Header::new(
            Algorithm::AesGcm,
            Argon2Params::default(),
            [0u8; SALT_LEN],
            64,
            0,
            0,
            &long_name,
            [0u8; HASH_LEN],
        );
        assert!(matches!(result, Err(SkitaError::InputTooLarge(_))));
    }
}
