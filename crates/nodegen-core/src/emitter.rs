//! Filesystem emitter
//!
//! Writes a composed file mapping under a new project root. The only
//! all-or-nothing guarantee is the up-front existence check: once writing
//! starts, a failure leaves earlier files in place.

use crate::compose::FileMapping;
use crate::error::GenerateError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directories created in every project, whether or not a file lands in them
pub const SKELETON_DIRS: &[&str] = &[
    "src/models",
    "src/routes",
    "src/controllers",
    "src/middlewares",
    "src/utils",
    "src/config",
    "src/tests",
    "src/db",
    "public/temp",
];

/// Files written by a successful emit, in write order
#[derive(Debug, Clone, Default)]
pub struct EmitReport {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Fail with `Conflict` if the project root already exists
pub fn ensure_available(root: &Path) -> Result<(), GenerateError> {
    if root.exists() {
        return Err(GenerateError::Conflict {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Map a `/` separated relative path onto the platform path under `root`
fn target_path(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Create the project root and skeleton, then write every mapped file
pub async fn emit(root: &Path, mapping: &FileMapping) -> Result<EmitReport, GenerateError> {
    // Root is created non-recursively so the create itself is the existence check
    fs::create_dir(root).await.map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => GenerateError::Conflict {
            path: root.to_path_buf(),
        },
        _ => GenerateError::write(root, e),
    })?;

    for dir in SKELETON_DIRS {
        let path = target_path(root, dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| GenerateError::write(&path, e))?;
    }

    let mut report = EmitReport {
        root: root.to_path_buf(),
        files: Vec::with_capacity(mapping.len()),
    };

    for (relative, content) in mapping.iter() {
        let path = target_path(root, relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GenerateError::write(parent, e))?;
        }
        fs::write(&path, content)
            .await
            .map_err(|e| GenerateError::write(&path, e))?;
        report.files.push(path);
    }

    Ok(report)
}
