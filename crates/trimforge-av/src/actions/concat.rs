//! Joining extracted segments with ffmpeg's concat demuxer.

use crate::command::{file_arg, ToolCommand, Verbosity};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Render a concat demuxer manifest, one `file '...'` line per segment.
///
/// Paths are made absolute since the demuxer resolves relative entries
/// against the manifest's own directory.
pub fn manifest_contents(segments: &[PathBuf]) -> Result<String> {
    let mut contents = String::new();
    for segment in segments {
        let path = std::path::absolute(segment)?;
        let path = path.to_str().ok_or_else(|| {
            Error::InvalidInput(format!("segment path is not valid UTF-8: {:?}", segment))
        })?;
        contents.push_str(&format!("file '{}'\n", path.replace('\'', r"'\''")));
    }
    Ok(contents)
}

/// Write the concat manifest for `segments` to `path`.
pub fn write_manifest(path: &Path, segments: &[PathBuf]) -> Result<()> {
    if segments.is_empty() {
        return Err(Error::InvalidInput("nothing to concatenate".to_string()));
    }

    std::fs::write(path, manifest_contents(segments)?)?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Wrote concat manifest {:?} ({} entries)", path, segments.len());

    Ok(())
}

/// Build the ffmpeg invocation that joins the manifest entries into `output`.
pub fn concat_command(
    ffmpeg: &Path,
    manifest: &Path,
    output: &Path,
    verbosity: Verbosity,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-nostdin", "-y"])
        .args(verbosity.ffmpeg_args())
        .args(["-f", "concat", "-safe", "0", "-i"])
        .arg(file_arg(manifest))
        .args(["-map", "0", "-c", "copy"])
        .arg(file_arg(output));
    cmd
}

/// Concatenate the manifest entries into `output`.
pub fn concat_segments(
    ffmpeg: &Path,
    manifest: &Path,
    output: &Path,
    verbosity: Verbosity,
) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::info!("Concatenating segments into {:?}", output);

    concat_command(ffmpeg, manifest, output, verbosity).execute()?;

    if !output.is_file() {
        return Err(Error::tool_failed(
            "ffmpeg",
            format!("concatenated output was not written to {}", output.display()),
        ));
    }

    Ok(())
}
