//! Moving finished files into their final location.

use crate::validate::parent_dir;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Renamed on the same device.
    Moved,
    /// Copied across devices, then the source was removed.
    Copied,
}

/// Whether `src` and the directory that will hold `dest` share a device.
#[cfg(unix)]
pub fn same_device(src: &Path, dest: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let src_dev = std::fs::metadata(src)?.dev();
    let dest_dev = std::fs::metadata(parent_dir(dest))?.dev();
    Ok(src_dev == dest_dev)
}

/// Whether `src` and the directory that will hold `dest` share a device.
///
/// Without device numbers a copy is always used.
#[cfg(not(unix))]
pub fn same_device(_src: &Path, _dest: &Path) -> Result<bool> {
    Ok(false)
}

/// Put `src` at `dest`, replacing whatever is there.
///
/// Renames when both are on one device, otherwise copies and removes the
/// source.
pub fn place_file(src: &Path, dest: &Path) -> Result<Placement> {
    if !src.is_file() {
        return Err(Error::file_not_found(src));
    }

    if same_device(src, dest)? {
        #[cfg(feature = "tracing")]
        tracing::debug!("Moving {:?} -> {:?}", src, dest);

        std::fs::rename(src, dest).map_err(|e| Error::placement(src, dest, e.to_string()))?;
        return Ok(Placement::Moved);
    }

    copy_across(src, dest)
}

/// Copy `src` to `dest`, then remove `src`.
fn copy_across(src: &Path, dest: &Path) -> Result<Placement> {
    #[cfg(feature = "tracing")]
    tracing::debug!("Copying {:?} -> {:?} (different device)", src, dest);

    std::fs::copy(src, dest)
        .map_err(|e| Error::placement(src, dest, format!("copy failed: {}", e)))?;
    std::fs::remove_file(src).map_err(|e| {
        Error::placement(src, dest, format!("copied, but removing the source failed: {}", e))
    })?;
    Ok(Placement::Copied)
}

/// Path the original input is saved under when it is replaced.
///
/// `movie.mkv` becomes `movie.orig.mkv` next to it.
pub fn backup_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}.orig.{}", stem, ext.to_string_lossy()),
        None => format!("{}.orig", stem),
    };
    input.with_file_name(name)
}

/// Rename `input` to its backup path and return that path.
///
/// Refuses to overwrite an existing backup.
pub fn backup_original(input: &Path) -> Result<PathBuf> {
    let backup = backup_path(input);
    if backup.exists() {
        return Err(Error::placement(
            input,
            &backup,
            "backup already exists",
        ));
    }

    std::fs::rename(input, &backup)
        .map_err(|e| Error::placement(input, &backup, e.to_string()))?;

    #[cfg(feature = "tracing")]
    tracing::info!("Saved original as {:?}", backup);

    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/v/movie.mkv")),
            PathBuf::from("/v/movie.orig.mkv")
        );
        assert_eq!(backup_path(Path::new("raw")), PathBuf::from("raw.orig"));
    }

    #[test]
    fn test_same_device_within_dir() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.mkv");
        std::fs::write(&src, b"x").unwrap();
        assert!(same_device(&src, &dir.path().join("b.mkv")).unwrap() || cfg!(not(unix)));
    }

    #[test]
    fn test_place_file_replaces_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("part.mkv");
        let dest = dir.path().join("out.mkv");
        std::fs::write(&src, b"new").unwrap();
        std::fs::write(&dest, b"old").unwrap();

        let placement = place_file(&src, &dest).unwrap();
        assert!(matches!(placement, Placement::Moved | Placement::Copied));
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
        assert!(!src.exists());
    }

    #[test]
    fn test_copy_across_replaces_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("part.mkv");
        let dest = dir.path().join("out.mkv");
        std::fs::write(&src, b"new").unwrap();
        std::fs::write(&dest, b"old").unwrap();

        assert_eq!(copy_across(&src, &dest).unwrap(), Placement::Copied);
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
        assert!(!src.exists());
    }

    #[test]
    fn test_copy_across_names_failed_step() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("part.mkv");
        std::fs::write(&src, b"new").unwrap();

        let err = copy_across(&src, &dir.path().join("missing/out.mkv")).unwrap_err();
        assert!(matches!(err, Error::Placement { .. }));
        assert!(err.to_string().contains("copy failed"), "{err}");
        assert!(src.exists());
    }

    #[test]
    fn test_place_file_missing_source() {
        let dir = tempdir().unwrap();
        let err = place_file(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_backup_original() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("movie.mkv");
        std::fs::write(&input, b"original").unwrap();

        let backup = backup_original(&input).unwrap();
        assert_eq!(backup, dir.path().join("movie.orig.mkv"));
        assert!(!input.exists());
        assert_eq!(std::fs::read(&backup).unwrap(), b"original");
    }

    #[test]
    fn test_backup_original_refuses_to_clobber() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("movie.mkv");
        std::fs::write(&input, b"original").unwrap();
        std::fs::write(dir.path().join("movie.orig.mkv"), b"older").unwrap();

        let err = backup_original(&input).unwrap_err();
        assert!(matches!(err, Error::Placement { .. }));
        assert!(input.exists());
    }
}
