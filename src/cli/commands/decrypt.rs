//! `skita decrypt` — restore files from `.skita` containers.

use std::path::{Path, PathBuf};

use crate::audit;
use crate::cli::{output, prompt_password, resolve_output_path, sanitize_filename};
use crate::engine::{Pipeline, Stage};
use crate::errors::Result;

/// Execute the `decrypt` command over the containers in order.
pub fn execute(files: &[PathBuf], out_dir: Option<&Path>, force: bool) -> Result<()> {
    // One password for the whole batch.
    let password = prompt_password()?;

    for file in files {
        let display_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        let container = std::fs::read(file)?;

        let pb = output::make_progress_bar(&display_name);
        let mut sink =
            |percent: u8, stage: Stage| output::update_progress_bar(&pb, percent, stage);
        let mut pipeline = Pipeline::new().with_progress(&mut sink);

        let result = pipeline.decrypt(&container, password.as_bytes());
        pb.finish_and_clear();

        let opened = match result {
            Ok(opened) => opened,
            Err(e) => {
                audit::log_operation("decrypt", &display_name, "failed");
                return Err(e);
            }
        };

        // The embedded name is untrusted; reduce it to a bare file name.
        let file_name = sanitize_filename(&opened.original_filename)?;
        let out_path = resolve_output_path(file, out_dir, &file_name, force)?;
        std::fs::write(&out_path, &opened.plaintext)?;

        audit::log_operation("decrypt", &display_name, "ok");
        output::success(&format!("{display_name} → {}", out_path.display()));

        if opened.verified {
            output::tip(&format!(
                "sha256 verified: {}",
                opened.plaintext_hash_hex.as_deref().unwrap_or("-")
            ));
        } else {
            output::warning(
                "Legacy container without an integrity hash — chunks authenticated individually only.",
            );
        }
    }

    Ok(())
}
