//! The encrypt/decrypt pipeline orchestrator.
//!
//! This module provides:
//! - `Pipeline`, which drives one encrypt or decrypt end-to-end
//!   (`encrypt`, `decrypt`)
//! - Progress reporting, cancellation, and status types (`progress`)
//!
//! A `Pipeline` is cheap to build and intended for a single invocation;
//! it holds no state beyond the progress sink, the cancellation token,
//! and the status of the last call.

mod decrypt;
mod encrypt;
pub mod progress;

pub use progress::{CancelToken, PipelineStatus, ProgressSink, Stage};

use crate::container::DEFAULT_CHUNK_SIZE;
use crate::crypto::{Algorithm, Argon2Params};
use crate::errors::{Result, SkitaError};

/// Options for `Pipeline::encrypt`.
#[derive(Debug, Clone, Copy)]
pub struct EncryptOptions {
    /// AEAD algorithm for every chunk (default: AES-256-GCM).
    pub algorithm: Algorithm,

    /// Argon2id parameters recorded in the header.
    pub argon2: Argon2Params,

    /// Cleartext bytes per chunk.  The default of 4 MiB is what ships;
    /// tests shrink this to exercise multi-chunk paths cheaply.
    pub chunk_size: u32,
}

impl Default for EncryptOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AesGcm,
            argon2: Argon2Params::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// The outcome of a successful encryption.
#[derive(Debug, Clone)]
pub struct Encrypted {
    /// The assembled container bytes.
    pub container: Vec<u8>,

    /// Suggested output filename: `<original>.skita`.
    pub output_filename: String,

    /// SHA-256 of the plaintext as 64 lowercase hex characters.
    pub plaintext_hash_hex: String,
}

/// The outcome of a successful decryption.
#[derive(Debug, Clone)]
pub struct Decrypted {
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,

    /// The filename embedded in the container, verbatim.  Sanitize
    /// before using as a path.
    pub original_filename: String,

    /// Whether the whole-plaintext hash was present and matched.
    /// `false` only for hashless legacy (v1) containers.
    pub verified: bool,

    /// Hex digest of the recovered plaintext when the container carried
    /// one to compare against.
    pub plaintext_hash_hex: Option<String>,
}

/// Drives one encryption or decryption end-to-end.
///
/// ```no_run
/// use skita::engine::{EncryptOptions, Pipeline};
///
/// let mut pipeline = Pipeline::new();
/// let sealed = pipeline
///     .encrypt(b"hello", "hello.txt", b"correct horse", &EncryptOptions::default())
///     .unwrap();
/// let opened = Pipeline::new().decrypt(&sealed.container, b"correct horse").unwrap();
/// assert_eq!(opened.plaintext, b"hello");
/// ```
pub struct Pipeline<'a> {
    progress: Option<&'a mut dyn ProgressSink>,
    cancel: CancelToken,
    status: PipelineStatus,
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self {
            progress: None,
            cancel: CancelToken::new(),
            status: PipelineStatus::Idle,
        }
    }

    /// Attach a progress sink.  Updates arrive at chunk boundaries.
    pub fn with_progress(mut self, sink: &'a mut dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Attach a cancellation token (share its clone with the canceller).
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Status of the most recent invocation.
    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    /// Encrypt `plaintext` into a `.skita` container.
    pub fn encrypt(
        &mut self,
        plaintext: &[u8],
        filename: &str,
        password: &[u8],
        options: &EncryptOptions,
    ) -> Result<Encrypted> {
        self.status = PipelineStatus::Processing;
        let result = encrypt::run(self, plaintext, filename, password, options);
        self.status = Self::final_status(&result);
        result
    }

    /// Decrypt a `.skita` container back to plaintext.
    pub fn decrypt(&mut self, container: &[u8], password: &[u8]) -> Result<Decrypted> {
        self.status = PipelineStatus::Processing;
        let result = decrypt::run(self, container, password);
        self.status = Self::final_status(&result);
        result
    }

    fn final_status<T>(result: &Result<T>) -> PipelineStatus {
        match result {
            Ok(_) => PipelineStatus::Success,
            Err(SkitaError::Cancelled) => PipelineStatus::Cancelled,
            Err(_) => PipelineStatus::Error,
        }
    }

    /// Emit a progress update if a sink is attached.
    pub(crate) fn emit(&mut self, percent: u8, stage: Stage) {
        if let Some(sink) = self.progress.as_mut() {
            sink.update(percent, stage);
        }
    }

    /// Honor cancellation between chunks.
    pub(crate) fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(SkitaError::Cancelled);
        }
        Ok(())
    }
}
