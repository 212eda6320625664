//! `skita inspect` — show container metadata without decrypting.
//!
//! Only the header is parsed; no password is required and no chunk is
//! touched.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::container::{Header, VERSION_V1};
use crate::errors::Result;

/// Execute the `inspect` command.
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let container = std::fs::read(file)?;
    let (header, _) = Header::from_bytes(&container)?;

    if json {
        print_json(&header, container.len());
    } else {
        print_table(&header, container.len());
    }

    Ok(())
}

fn print_json(header: &Header, container_len: usize) {
    let value = serde_json::json!({
        "version": header.version,
        "algorithm": header.algorithm.name(),
        "kdf": {
            "name": "Argon2id",
            "memory_kib": header.argon2.memory_kib,
            "iterations": header.argon2.iterations,
            "parallelism": header.argon2.parallelism,
        },
        "chunk_size": header.chunk_size,
        "original_size": header.original_size,
        "total_chunks": header.total_chunks,
        "filename": header.filename,
        "plaintext_hash": header.plaintext_hash.map(hex::encode),
        "container_size": container_len,
    });
    println!("{}", serde_json::to_string_pretty(&value).expect("json serializes"));
}

fn print_table(header: &Header, container_len: usize) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let version = if header.version == VERSION_V1 {
        "1 (legacy)".to_string()
    } else {
        header.version.to_string()
    };

    table.add_row(vec!["Version".to_string(), version]);
    table.add_row(vec!["Algorithm".to_string(), header.algorithm.name().to_string()]);
    table.add_row(vec![
        "KDF".to_string(),
        format!(
            "Argon2id (m={} KiB, t={}, p={})",
            header.argon2.memory_kib, header.argon2.iterations, header.argon2.parallelism
        ),
    ]);
    table.add_row(vec!["Chunk size".to_string(), format!("{} bytes", header.chunk_size)]);
    table.add_row(vec![
        "Original size".to_string(),
        format!("{} bytes", header.original_size),
    ]);
    table.add_row(vec!["Chunks".to_string(), header.total_chunks.to_string()]);
    table.add_row(vec!["Filename".to_string(), header.filename.clone()]);
    table.add_row(vec![
        "Plaintext hash".to_string(),
        header
            .plaintext_hash
            .map(hex::encode)
            .unwrap_or_else(|| "absent (legacy)".to_string()),
    ]);
    table.add_row(vec!["Container size".to_string(), format!("{container_len} bytes")]);

    println!("{table}");

    if header.plaintext_hash.is_none() {
        output::warning("This container predates the embedded integrity hash.");
    }
}
