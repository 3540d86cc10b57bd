use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Which file timestamp stands in for the capture time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// Birth time, or modification time where the platform does not record one.
    #[default]
    Created,
    Modified,
}

impl TimeSource {
    fn read(self, meta: &fs::Metadata) -> FileTime {
        let modified = FileTime::from_last_modification_time(meta);
        match self {
            TimeSource::Created => FileTime::from_creation_time(meta).unwrap_or(modified),
            TimeSource::Modified => modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoItem {
    pub path: PathBuf,
    /// File name without extension
    pub stem: String,
    pub file_name: String,
    pub capture_time: FileTime,
}

impl PhotoItem {
    pub fn new(path: impl Into<PathBuf>, capture_time: FileTime) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            stem,
            file_name,
            capture_time,
        }
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.capture_time.unix_seconds(), self.capture_time.nanoseconds())
    }
}

/// Strip a leading dot so `.jpg` and `jpg` mean the same thing.
pub fn normalize_extension(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

/// List photos directly inside `source_dir` (not recursive) and sort them by
/// capture time, then by file name for identical timestamps.
pub fn list_photos(source_dir: &Path, extension: &str, time_source: TimeSource) -> Result<Vec<PhotoItem>> {
    let extension = normalize_extension(extension);
    let entries = fs::read_dir(source_dir).map_err(|e| Error::filesystem("list", source_dir, e))?;

    let mut photos = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::filesystem("list", source_dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        // follows symlinks, like a shell glob would
        let meta = fs::metadata(&path).map_err(|e| Error::filesystem("stat", &path, e))?;
        if !meta.is_file() {
            continue;
        }
        photos.push(PhotoItem::new(path, time_source.read(&meta)));
    }

    sort_photos(&mut photos);
    debug!("Found {} .{} photos in {}", photos.len(), extension, source_dir.display());
    Ok(photos)
}

pub fn sort_photos(photos: &mut [PhotoItem]) {
    photos.sort_by(|a, b| {
        a.capture_time
            .cmp(&b.capture_time)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });
}
