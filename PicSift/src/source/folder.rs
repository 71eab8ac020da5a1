///! Turning picker selections into blobs
///!
///! A folder selection reports every file with a path relative to the parent of
///! the chosen folder (`holiday/day1/beach.jpg`), a file selection reports bare
///! names. Both are reproduced here.
use super::RawBlob;
use crate::utils::error::{PicSiftError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect every regular file under `root`, recursively
///
/// Relative paths start with the folder's own name and always use `/`.
/// Entries that cannot be read are skipped with a warning.
pub fn collect_folder(root: impl AsRef<Path>) -> Result<Vec<RawBlob>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(PicSiftError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PicSiftError::InvalidPath(root.display().to_string()))?;

    let mut blobs = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        match RawBlob::from_path(entry.path()) {
            Ok(blob) => {
                let relative_path = join_relative(&root_name, relative);
                blobs.push(blob.with_relative_path(relative_path));
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", entry.path().display(), e);
            }
        }
    }

    tracing::debug!("Collected {} files from {}", blobs.len(), root.display());
    Ok(blobs)
}

/// Collect individually selected files
///
/// Fails on the first path that cannot be opened, since the caller named it
/// explicitly.
pub fn collect_files<I, P>(paths: I) -> Result<Vec<RawBlob>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(|path| {
            let path: PathBuf = path.into();
            RawBlob::from_path(path)
        })
        .collect()
}

fn join_relative(root_name: &str, relative: &Path) -> String {
    std::iter::once(root_name.to_string())
        .chain(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}
