//! `skita encrypt` — encrypt files into `.skita` containers.

use std::path::{Path, PathBuf};

use crate::audit;
use crate::cli::{output, prompt_new_password, resolve_output_path};
use crate::config::Settings;
use crate::engine::{EncryptOptions, Pipeline, Stage};
use crate::errors::{Result, SkitaError};

/// Execute the `encrypt` command over the files in order.
pub fn execute(
    files: &[PathBuf],
    out_dir: Option<&Path>,
    algorithm: Option<&str>,
    force: bool,
) -> Result<()> {
    let settings = Settings::load(Path::new("."))?;
    let algorithm = match algorithm {
        Some(name) => name.parse()?,
        None => settings.algorithm()?,
    };
    let options = EncryptOptions {
        algorithm,
        argon2: settings.argon2_params(),
        ..EncryptOptions::default()
    };

    // One password for the whole batch.
    let password = prompt_new_password()?;

    for file in files {
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SkitaError::CommandFailed(format!(
                    "{} has no usable UTF-8 file name",
                    file.display()
                ))
            })?;
        let plaintext = std::fs::read(file)?;

        let pb = output::make_progress_bar(filename);
        let mut sink =
            |percent: u8, stage: Stage| output::update_progress_bar(&pb, percent, stage);
        let mut pipeline = Pipeline::new().with_progress(&mut sink);

        let result = pipeline.encrypt(&plaintext, filename, password.as_bytes(), &options);
        pb.finish_and_clear();

        let sealed = match result {
            Ok(sealed) => sealed,
            Err(e) => {
                audit::log_operation("encrypt", filename, "failed");
                return Err(e);
            }
        };

        let out_path = resolve_output_path(file, out_dir, &sealed.output_filename, force)?;
        std::fs::write(&out_path, &sealed.container)?;

        audit::log_operation("encrypt", filename, "ok");
        output::success(&format!(
            "{filename} → {} ({})",
            out_path.display(),
            algorithm.name()
        ));
        output::tip(&format!("sha256 {}", sealed.plaintext_hash_hex));
    }

    Ok(())
}
