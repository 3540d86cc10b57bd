use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The filesystem operations the provisioner, grouper and executor rely on.
pub trait DirectoryStore {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Move `file` into `dir`, keeping its file name. Returns the new path.
    /// Fails with [`Error::DestinationExists`] rather than replacing a file.
    fn move_into(&self, file: &Path, dir: &Path) -> Result<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl DirectoryStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| Error::filesystem("create directory", path, e))
    }

    fn move_into(&self, file: &Path, dir: &Path) -> Result<PathBuf> {
        let dest = destination(file, dir)?;
        // rename(2) silently replaces an existing file on unix
        if dest.exists() {
            return Err(Error::DestinationExists { path: dest });
        }
        fs::rename(file, &dest).map_err(|e| Error::filesystem("move", file, e))?;
        Ok(dest)
    }
}

pub(crate) fn destination(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file.file_name().ok_or_else(|| {
        Error::filesystem(
            "move",
            file,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    Ok(dir.join(name))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_fs_move_into() {
        let dir = tempdir().unwrap();
        let photo = dir.path().join("IMG1.jpg");
        File::create(&photo).unwrap();
        let target = dir.path().join("Ann_Lee");
        FsStore.create_dir(&target).unwrap();

        let moved = FsStore.move_into(&photo, &target).unwrap();
        assert_eq!(moved, target.join("IMG1.jpg"));
        assert!(moved.exists());
        assert!(!photo.exists());
    }

    #[test]
    fn test_fs_move_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("Ann_Lee");
        FsStore.create_dir(&target).unwrap();
        File::create(target.join("IMG1.jpg")).unwrap();
        let photo = dir.path().join("IMG1.jpg");
        File::create(&photo).unwrap();

        let err = FsStore.move_into(&photo, &target).unwrap_err();
        assert!(matches!(err, Error::DestinationExists { .. }));
        assert!(photo.exists());
    }

    #[test]
    fn test_fs_create_dir_needs_parent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("missing").join("Ann_Lee");
        let err = FsStore.create_dir(&nested).unwrap_err();
        assert!(matches!(err, Error::Filesystem { action: "create directory", .. }));
    }
}
