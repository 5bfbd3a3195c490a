//! Shared helpers for integration tests.
//!
//! Provides [`FakeFfmpeg`], a shell script standing in for ffmpeg. It logs
//! each invocation's arguments on one line and writes a small file for every
//! argument that follows `-c copy`, so the trim flow can run end to end
//! without real media.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Content written for each extracted segment.
pub const SEGMENT_CONTENT: &str = "segment\n";
/// Content written for a concatenated output.
pub const CONCAT_CONTENT: &str = "joined\n";
/// Content a failing concat leaves behind.
pub const PARTIAL_CONTENT: &str = "partial\n";

pub struct FakeFfmpeg {
    dir: TempDir,
}

impl FakeFfmpeg {
    /// A fake ffmpeg that succeeds.
    pub fn new() -> Self {
        Self::with_exit(0, 0)
    }

    /// A fake ffmpeg that writes nothing and exits with `code`.
    pub fn failing(code: i32) -> Self {
        Self::with_exit(code, 0)
    }

    /// A fake ffmpeg that extracts segments, but on concat writes a partial
    /// file and exits with `code`.
    pub fn failing_concat(code: i32) -> Self {
        Self::with_exit(0, code)
    }

    fn with_exit(code: i32, concat_code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("invocations.log");
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> '{log}'
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 0.0-fake"
    exit 0
fi
if [ {code} -ne 0 ]; then
    echo "fake ffmpeg failing" >&2
    exit {code}
fi
concat=0
prev=""
for arg in "$@"; do
    if [ "$prev" = "-f" ] && [ "$arg" = "concat" ]; then
        concat=1
    fi
    if [ "$prev" = "copy" ]; then
        if [ $concat -eq 1 ] && [ {concat_code} -ne 0 ]; then
            printf '{partial}' > "$arg"
            echo "fake ffmpeg concat failing" >&2
            exit {concat_code}
        elif [ $concat -eq 1 ]; then
            printf '{concat}' > "$arg"
        else
            printf '{segment}' > "$arg"
        fi
    fi
    prev="$arg"
done
exit 0
"#,
            log = log.display(),
            code = code,
            concat_code = concat_code,
            partial = PARTIAL_CONTENT.replace('\n', "\\n"),
            concat = CONCAT_CONTENT.replace('\n', "\\n"),
            segment = SEGMENT_CONTENT.replace('\n', "\\n"),
        );

        let path = dir.path().join("ffmpeg");
        fs::write(&path, script).unwrap();
        make_executable(&path);

        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("ffmpeg")
    }

    /// Logged invocations, one argument string per call.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("invocations.log"))
            .unwrap_or_default()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Write a stand-in input video.
pub fn write_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"original video").unwrap();
    path
}

/// An empty config file, so tests never pick up a user config.
pub fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("trimforge.toml");
    fs::write(&path, "").unwrap();
    path
}

/// Entries left in `dir` whose names start with `trimforge-`.
pub fn leftover_workdirs(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("trimforge-"))
        .map(|e| e.path())
        .collect()
}
