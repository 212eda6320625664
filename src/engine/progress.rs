//! Progress reporting, cooperative cancellation, and pipeline status.
//!
//! The engine reports progress as `(percent, stage)` pairs at chunk
//! boundaries.  Percent values are monotonically non-decreasing within
//! one invocation and the sink may be called synchronously from the hot
//! loop, so implementations should stay cheap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A coarse label for what the pipeline is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Hashing the whole plaintext (encrypt, 0–10%).
    Hashing,
    /// Running Argon2id (12–20%).
    DerivingKey,
    /// Sealing chunks (encrypt, 20–100%).
    Encrypting,
    /// Opening chunks (decrypt, 20–95%).
    Decrypting,
    /// Re-hashing decrypted plaintext against the stored hash (95–100%).
    Verifying,
}

impl Stage {
    /// Short label suitable for a progress bar.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Hashing => "hashing",
            Stage::DerivingKey => "deriving key",
            Stage::Encrypting => "encrypting",
            Stage::Decrypting => "decrypting",
            Stage::Verifying => "verifying",
        }
    }
}

/// Receives progress updates from the pipeline.
///
/// Implemented for any `FnMut(u8, Stage)` closure, so callers can pass
/// `|percent, stage| { ... }` directly.
pub trait ProgressSink {
    fn update(&mut self, percent: u8, stage: Stage);
}

impl<F: FnMut(u8, Stage)> ProgressSink for F {
    fn update(&mut self, percent: u8, stage: Stage) {
        self(percent, stage)
    }
}

/// Cooperative cancellation flag, checked between chunks.
///
/// Clone the token and hand one half to another thread (or a signal
/// handler); the pipeline polls its copy and returns `Cancelled`
/// without emitting partial output.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.  Takes effect at the next chunk boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Lifecycle of one pipeline invocation.
///
/// `Idle → Processing → {Success | Error | Cancelled}`.  Terminal states
/// are final for the invocation; callers retry with a fresh call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Processing,
    Success,
    Error,
    Cancelled,
}
