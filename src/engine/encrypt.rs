//! The encryption pipeline.
//!
//! Hash the whole plaintext, derive the master secret, then seal one
//! chunk at a time under its own subkey/nonce and frame the records
//! behind the header.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::container::{
    header::{Header, MAX_FILENAME_LEN},
    record, EXTENSION,
};
use crate::crypto::{
    derive_chunk_key, derive_chunk_nonce, derive_master_secret, generate_master_nonce,
    generate_salt, seal,
};
use crate::errors::{Result, SkitaError};

use super::{Encrypted, EncryptOptions, Pipeline, Stage};

pub(super) fn run(
    pipeline: &mut Pipeline,
    plaintext: &[u8],
    filename: &str,
    password: &[u8],
    options: &EncryptOptions,
) -> Result<Encrypted> {
    let original_size = u32::try_from(plaintext.len()).map_err(|_| {
        SkitaError::InputTooLarge(format!(
            "plaintext is {} bytes, the format caps at {} bytes",
            plaintext.len(),
            u32::MAX
        ))
    })?;
    if filename.len() > MAX_FILENAME_LEN {
        return Err(SkitaError::InputTooLarge(format!(
            "filename is {} bytes, maximum is {MAX_FILENAME_LEN}",
            filename.len()
        )));
    }
    if options.chunk_size == 0 {
        return Err(SkitaError::MalformedHeader(
            "chunk size must not be zero".into(),
        ));
    }

    // 1. Hash the full plaintext up front; the digest goes in the header.
    pipeline.emit(0, Stage::Hashing);
    let plaintext_hash: [u8; 32] = Sha256::digest(plaintext).into();
    pipeline.emit(10, Stage::Hashing);

    // 2. Fresh salt and master nonce for this encryption.
    let salt = generate_salt();
    let master_nonce = generate_master_nonce();

    // 3. Derive the master secret (the expensive step).
    pipeline.emit(12, Stage::DerivingKey);
    let master = derive_master_secret(password, &salt, &options.argon2)?;
    pipeline.emit(20, Stage::DerivingKey);

    // 4. Header first, records after.
    let chunk_size = options.chunk_size as usize;
    let total_chunks = if original_size == 0 {
        0
    } else {
        1 + (original_size - 1) / options.chunk_size
    };

    let header = Header::new(
        options.algorithm,
        options.argon2,
        salt,
        options.chunk_size,
        original_size,
        total_chunks,
        filename,
        plaintext_hash,
    )?;

    let mut container = header.to_bytes()?;
    container.reserve(header.body_len() as usize);

    // 5. Seal chunks in ascending index order.
    for (index, chunk) in plaintext.chunks(chunk_size).enumerate() {
        pipeline.check_cancelled()?;

        let index = index as u32;
        let mut chunk_key = derive_chunk_key(master.as_bytes(), index);
        let chunk_nonce = derive_chunk_nonce(&master_nonce, index);

        let sealed = seal(options.algorithm, &chunk_key, &chunk_nonce, chunk);
        chunk_key.zeroize();
        record::write_record(&mut container, &chunk_nonce, &sealed?)?;

        // Chunks span 20..=100 linearly.
        let percent = 20 + ((u64::from(index) + 1) * 80 / u64::from(total_chunks)) as u8;
        pipeline.emit(percent, Stage::Encrypting);
    }

    if total_chunks == 0 {
        pipeline.emit(100, Stage::Encrypting);
    }

    Ok(Encrypted {
        container,
        output_filename: format!("{filename}.{EXTENSION}"),
        plaintext_hash_hex: hex::encode(plaintext_hash),
    })
}
