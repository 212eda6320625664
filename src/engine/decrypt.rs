//! The decryption pipeline.
//!
//! Parse the header, re-derive the master secret from the stored salt
//! and KDF parameters, open each chunk with the on-wire nonce, then
//! compare the whole-plaintext hash (v2) in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::container::{header::Header, record::RecordReader};
use crate::crypto::{derive_chunk_key, derive_master_secret, open};
use crate::errors::{Result, SkitaError};

use super::{Decrypted, Pipeline, Stage};

pub(super) fn run(
    pipeline: &mut Pipeline,
    container: &[u8],
    password: &[u8],
) -> Result<Decrypted> {
    // 1. Parse the header (resolves the legacy hash-or-not shape too).
    let (header, first_record_offset) = Header::from_bytes(container)?;

    // 2. Re-derive the master secret with the stored salt and params.
    pipeline.emit(12, Stage::DerivingKey);
    let master = derive_master_secret(password, &header.salt, &header.argon2)?;
    pipeline.emit(20, Stage::DerivingKey);

    // 3. Open every chunk in order.  The record's nonce is authoritative:
    //    the master nonce is never stored, so it cannot be re-derived.
    let mut plaintext = Vec::with_capacity(header.original_size as usize);
    let mut reader = RecordReader::new(container, first_record_offset);

    for index in 0..header.total_chunks {
        pipeline.check_cancelled()?;

        let (nonce, payload) = reader.next_record(index)?;
        let mut chunk_key = derive_chunk_key(master.as_bytes(), index);
        let opened = open(header.algorithm, &chunk_key, &nonce, payload);
        chunk_key.zeroize();
        plaintext.extend_from_slice(&opened?);

        // Chunks span 20..=95; the hash check takes the final stretch.
        let percent = 20 + ((u64::from(index) + 1) * 75 / u64::from(header.total_chunks)) as u8;
        pipeline.emit(percent, Stage::Decrypting);
    }
    reader.finish()?;

    if plaintext.len() != header.original_size as usize {
        return Err(SkitaError::MalformedHeader(format!(
            "decrypted {} bytes but the header claims {}",
            plaintext.len(),
            header.original_size
        )));
    }

    // 4. Whole-plaintext integrity check (v2 containers only).
    let (verified, plaintext_hash_hex) = match header.plaintext_hash {
        Some(expected) => {
            pipeline.emit(95, Stage::Verifying);
            let actual: [u8; 32] = Sha256::digest(&plaintext).into();
            if !bool::from(actual.ct_eq(&expected)) {
                return Err(SkitaError::IntegrityFailure);
            }
            pipeline.emit(100, Stage::Verifying);
            (true, Some(hex::encode(actual)))
        }
        None => {
            pipeline.emit(100, Stage::Decrypting);
            (false, None)
        }
    };

    Ok(Decrypted {
        plaintext,
        original_filename: header.filename,
        verified,
        plaintext_hash_hex,
    })
}
