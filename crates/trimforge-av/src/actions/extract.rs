//! Stream-copy extraction of keep segments.

use crate::command::{file_arg, ToolCommand, Verbosity};
use crate::segment::KeepSegment;
use crate::{Error, Result, Workspace};
use std::path::{Path, PathBuf};

/// Segments to cut out of one input, with the file each one is written to.
#[derive(Debug, Clone)]
pub struct ExtractPlan {
    input: PathBuf,
    outputs: Vec<(KeepSegment, PathBuf)>,
}

impl ExtractPlan {
    /// Plan one intermediate file per segment inside `workspace`.
    pub fn new(input: &Path, segments: &[KeepSegment], workspace: &Workspace) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidInput(
                "at least one keep segment is required".to_string(),
            ));
        }

        let outputs = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| (*seg, workspace.segment_path(i)))
            .collect();

        Ok(Self {
            input: input.to_path_buf(),
            outputs,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn outputs(&self) -> &[(KeepSegment, PathBuf)] {
        &self.outputs
    }

    /// Intermediate files in segment order.
    pub fn segment_files(&self) -> Vec<PathBuf> {
        self.outputs.iter().map(|(_, p)| p.clone()).collect()
    }
}

/// Build the single ffmpeg invocation that writes every segment file.
///
/// Each segment becomes its own output with `-ss`/`-to` as output options;
/// `-to` is left out for segments running to the end of the input.
pub fn extract_command(ffmpeg: &Path, plan: &ExtractPlan, verbosity: Verbosity) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-nostdin", "-y"])
        .args(verbosity.ffmpeg_args())
        .arg("-i")
        .arg(file_arg(plan.input()));

    for (segment, output) in plan.outputs() {
        cmd.arg("-ss").arg(segment.start.to_string());
        if !segment.is_open_ended() {
            cmd.arg("-to").arg(segment.end.to_string());
        }
        cmd.args(["-map", "0", "-c", "copy"]).arg(file_arg(output));
    }

    cmd
}

/// Run the extraction and check every segment file was produced.
pub fn extract_segments(ffmpeg: &Path, plan: &ExtractPlan, verbosity: Verbosity) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::info!(
        "Extracting {} segment(s) from {:?}",
        plan.outputs().len(),
        plan.input()
    );

    extract_command(ffmpeg, plan, verbosity).execute()?;

    for (segment, output) in plan.outputs() {
        if !output.is_file() {
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("segment {} was not written to {}", segment, output.display()),
            ));
        }
    }

    Ok(())
}
