//! Working directory for intermediate files.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const WORKDIR_PREFIX: &str = "trimforge-";
const FALLBACK_EXTENSION: &str = "mkv";

/// Workspace (WORKDIR) holding the per-segment files and the concat manifest.
///
/// The directory is removed when the workspace is dropped unless it was
/// persisted first.
///
/// # Example
///
/// ```no_run
/// use trimforge_av::Workspace;
///
/// let workspace = Workspace::new("/path/to/input.mkv", None)?;
/// let first = workspace.segment_path(0);
/// assert!(first.starts_with(workspace.dir()));
/// workspace.cleanup()?;
/// # Ok::<(), trimforge_av::Error>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: TempDir,
    stem: String,
    extension: String,
}

impl Workspace {
    /// Create a workspace for trimming `input`.
    ///
    /// The directory is created under `base`, or the system temp dir when
    /// `base` is `None`.
    pub fn new<P: AsRef<Path>>(input: P, base: Option<&Path>) -> Result<Self> {
        let input = input.as_ref();

        let stem = input
            .file_stem()
            .ok_or_else(|| Error::InvalidInput(format!("invalid input file path: {:?}", input)))?
            .to_string_lossy()
            .to_string();
        let extension = input
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKDIR_PREFIX);
        let temp_dir = match base {
            Some(base) => builder.tempdir_in(base),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Workspace(format!("failed to create working directory: {}", e)))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Created working directory {:?}", temp_dir.path());

        Ok(Self {
            temp_dir,
            stem,
            extension,
        })
    }

    /// Get the working directory path.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the intermediate file for the segment at `index`.
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir().join(format!(
            "{}.part{:03}.{}",
            self.stem,
            index + 1,
            self.extension
        ))
    }

    /// Path ffmpeg concatenates into before the result is placed.
    pub fn joined_path(&self) -> PathBuf {
        self.dir()
            .join(format!("{}.joined.{}", self.stem, self.extension))
    }

    /// Path of the concat manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir().join(format!("{}.concat.txt", self.stem))
    }

    /// Delete the working directory and everything in it.
    pub fn cleanup(self) -> Result<()> {
        let dir = self.dir().to_path_buf();
        self.temp_dir.close().map_err(|e| {
            Error::Workspace(format!("failed to remove {}: {}", dir.display(), e))
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Removed working directory {:?}", dir);

        Ok(())
    }

    /// Keep the working directory on disk and return its path.
    pub fn persist(self) -> PathBuf {
        self.temp_dir.keep()
    }
}
