//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{Result, SkitaError};
use crate::passphrase::{self, Strength};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Skita CLI: password-based file encryption.
#[derive(Parser)]
#[command(
    name = "skita",
    about = "Password-based file encryption (.skita containers)",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt files into .skita containers
    Encrypt {
        /// Files to encrypt (processed in order)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the .skita outputs (default: next to each input)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// AEAD algorithm: aes-gcm or chacha20-poly1305 (default from .skita.toml)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Decrypt .skita containers back to their original files
    Decrypt {
        /// Containers to decrypt (processed in order)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the restored files (default: next to each container)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Show container metadata without decrypting
    Inspect {
        /// Container to inspect
        file: PathBuf,

        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show recent encrypt/decrypt operations
    History {
        /// Number of entries to show (default: 20)
        #[arg(long, default_value = "20")]
        last: usize,
    },

    /// Generate a random passphrase
    Genpass {
        /// Number of words (3-10)
        #[arg(short, long, default_value = "5")]
        words: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the password for decryption, trying in order:
/// 1. `SKITA_PASSWORD` env var (CI/scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SKITA_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter password")
        .interact()
        .map_err(|e| SkitaError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `encrypt`).
///
/// Also respects `SKITA_PASSWORD` for scripted usage.  Enforces a
/// minimum password length and warns about weak choices.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("SKITA_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(SkitaError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| SkitaError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        if passphrase::score(&password) == Strength::Weak {
            output::warning("This password is weak — consider `skita genpass`.");
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Reduce an embedded container filename to a safe final path component.
///
/// The format stores filenames verbatim, so a hostile container could
/// embed `../../etc/passwd`.  Strip directory components and reject
/// names that are empty or pure navigation after stripping.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let candidate = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_matches(char::from(0));

    if candidate.is_empty() || candidate == "." || candidate == ".." {
        return Err(SkitaError::CommandFailed(format!(
            "container filename '{name}' does not reduce to a usable file name"
        )));
    }

    Ok(candidate.to_string())
}

/// Resolve where an output file should land and refuse to clobber.
pub fn resolve_output_path(
    input: &std::path::Path,
    out_dir: Option<&std::path::Path>,
    file_name: &str,
    force: bool,
) -> Result<PathBuf> {
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().unwrap_or(std::path::Path::new(".")).to_path_buf(),
    };

    let path = dir.join(file_name);
    if path.exists() && !force {
        return Err(SkitaError::OutputExists(path));
    }
    Ok(path)
}
