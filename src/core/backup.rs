use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// File-level copy of the SQLite database.
pub struct BackupLogic;

impl BackupLogic {
    /// Copy `db_path` to `dest_file`, optionally as a `.zip`.
    /// Returns the final path, or `None` when the user declined to overwrite.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() {
            let question = format!("The file '{}' already exists. Overwrite it?", dest.display());
            if !force && !confirm(&question) {
                info("Backup cancelled.");
                return Ok(None);
            }
            fs::remove_file(dest)?;
        }

        // VACUUM INTO writes a consistent snapshot even while another process writes.
        {
            let conn = Connection::open(src)?;
            let dest_str = dest.to_string_lossy().to_string();
            conn.execute("VACUUM INTO ?1", [&dest_str])?;
        }
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            } else {
                info(format!("Removed uncompressed backup: {}", dest.display()));
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        if let Ok(conn) = Connection::open(src) {
            audit(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(final_path))
    }
}

/// Compress a backup using .zip (deflate).
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rationlog.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
