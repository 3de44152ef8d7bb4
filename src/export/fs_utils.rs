// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::ui::prompt::confirm;
use std::path::Path;

/// Check whether an output file may be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` → Ok
/// - file exists otherwise → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if confirm("Overwrite?") {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".into(),
        ))
    }
}

/// Export targets must be absolute paths.
pub(crate) fn require_absolute(path: &Path) -> AppResult<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "output file path must be absolute: {}",
            path.display()
        )))
    }
}
