//! Pre-flight checks on the input and output paths.

use crate::{Error, Result};
use std::fs::File;
use std::path::Path;

/// Check that `input` exists, is a regular file and can be opened.
pub fn check_readable(input: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(input) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::file_not_found(input))
        }
        Err(e) => return Err(Error::Io(e)),
    };

    if !metadata.is_file() {
        return Err(Error::InvalidInput(format!(
            "not a regular file: {}",
            input.display()
        )));
    }

    File::open(input)?;
    Ok(())
}

/// Check that an existing file may be overwritten.
///
/// A path that does not exist yet passes.
pub fn check_writable_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            Err(Error::not_writable(path, "is a directory"))
        }
        Ok(metadata) if metadata.permissions().readonly() => {
            Err(Error::not_writable(path, "file is read-only"))
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Check that new files can be created in `dir` by creating a probe file.
pub fn check_writable_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::not_writable(dir, "directory does not exist"));
    }

    let probe = tempfile::Builder::new()
        .prefix(".trimforge-probe-")
        .tempfile_in(dir)
        .map_err(|e| Error::not_writable(dir, e.to_string()))?;
    probe
        .close()
        .map_err(|e| Error::not_writable(dir, e.to_string()))
}

/// Directory that will contain `path`, treating a bare file name as the
/// current directory.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_check_readable() {
        let file = NamedTempFile::new().unwrap();
        assert!(check_readable(file.path()).is_ok());
    }

    #[test]
    fn test_check_readable_missing() {
        let err = check_readable(Path::new("/nonexistent/movie.mkv")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_check_readable_directory() {
        let dir = tempdir().unwrap();
        let err = check_readable(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_check_writable_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("new.mkv");
        assert!(check_writable_file(&missing).is_ok());

        let existing = dir.path().join("old.mkv");
        std::fs::write(&existing, b"x").unwrap();
        assert!(check_writable_file(&existing).is_ok());

        let mut perms = std::fs::metadata(&existing).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&existing, perms).unwrap();
        let err = check_writable_file(&existing).unwrap_err();
        assert!(matches!(err, Error::NotWritable { .. }));
    }

    #[test]
    fn test_check_writable_dir() {
        let dir = tempdir().unwrap();
        assert!(check_writable_dir(dir.path()).is_ok());
        // The probe file is gone again.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let err = check_writable_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::NotWritable { .. }));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("out.mkv")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/a/b/out.mkv")), Path::new("/a/b"));
    }
}
