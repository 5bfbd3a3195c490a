//! Trimming a file down to its keep segments.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use trimforge_av::actions::{self, ExtractPlan};
use trimforge_av::place::{self, Placement};
use trimforge_av::validate;
use trimforge_av::{KeepSegment, Verbosity, Workspace};

/// What to trim and where the result goes.
#[derive(Debug, Clone)]
pub struct TrimOptions {
    pub input: PathBuf,
    /// Destination; `None` replaces the input.
    pub output: Option<PathBuf>,
    pub segments: Vec<KeepSegment>,
    /// Keep the original as `<stem>.orig.<ext>` when replacing it.
    pub keep_backup: bool,
    /// Remove the working directory afterwards.
    pub cleanup: bool,
    /// Base directory for the working directory.
    pub workdir: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub force: bool,
    pub verbosity: Verbosity,
}

/// Outcome of a finished trim.
#[derive(Debug, Clone)]
pub struct TrimReport {
    pub output: PathBuf,
    pub backup: Option<PathBuf>,
    /// Working directory left on disk (`--no-cleanup`).
    pub workdir: Option<PathBuf>,
    pub segments: usize,
    pub placement: Placement,
}

/// A trim of one input file.
pub struct TrimJob {
    ffmpeg: PathBuf,
    options: TrimOptions,
}

impl TrimJob {
    pub fn new(ffmpeg: PathBuf, options: TrimOptions) -> Self {
        Self { ffmpeg, options }
    }

    /// Whether the result takes the input's place.
    pub fn replaces_input(&self) -> bool {
        match self.options.output {
            None => true,
            Some(ref out) => same_file(out, &self.options.input),
        }
    }

    /// Final location of the trimmed file.
    pub fn destination(&self) -> &Path {
        match self.options.output {
            Some(ref out) if !self.replaces_input() => out,
            _ => &self.options.input,
        }
    }

    /// Check the input can be read and every path that will be written is
    /// writable.
    pub fn validate(&self) -> Result<()> {
        let opts = &self.options;

        if opts.segments.is_empty() {
            anyhow::bail!("At least one --keep segment is required");
        }

        validate::check_readable(&opts.input)
            .with_context(|| format!("Cannot read input {:?}", opts.input))?;

        let dest = self.destination();
        if self.replaces_input() {
            validate::check_writable_file(dest)
                .with_context(|| format!("Cannot replace input {:?}", dest))?;
        } else {
            if dest.exists() && !opts.force {
                anyhow::bail!(
                    "Output file already exists: {:?} (use --force to overwrite)",
                    dest
                );
            }
            validate::check_writable_file(dest)
                .with_context(|| format!("Cannot write output {:?}", dest))?;
        }

        let dest_dir = validate::parent_dir(dest);
        validate::check_writable_dir(dest_dir)
            .with_context(|| format!("Cannot write to output directory {:?}", dest_dir))?;

        if self.replaces_input() && opts.keep_backup {
            let backup = place::backup_path(&opts.input);
            if backup.exists() {
                anyhow::bail!(
                    "Backup file already exists: {:?} (remove it or use --no-save)",
                    backup
                );
            }
        }

        Ok(())
    }

    /// The ffmpeg command lines a run would execute, without running them.
    pub fn dry_run(&self) -> Result<Vec<String>> {
        self.validate()?;

        let workspace = self.workspace()?;
        let plan = ExtractPlan::new(&self.options.input, &self.options.segments, &workspace)?;

        let mut lines =
            vec![actions::extract_command(&self.ffmpeg, &plan, self.options.verbosity).display()];
        if plan.outputs().len() > 1 {
            lines.push(
                actions::concat_command(
                    &self.ffmpeg,
                    &workspace.manifest_path(),
                    &workspace.joined_path(),
                    self.options.verbosity,
                )
                .display(),
            );
        }

        workspace.cleanup()?;
        Ok(lines)
    }

    /// Extract the segments, join or place them and clean up.
    pub fn run(self) -> Result<TrimReport> {
        self.validate()?;

        let workspace = self.workspace()?;
        let plan = ExtractPlan::new(&self.options.input, &self.options.segments, &workspace)?;

        for (i, (segment, _)) in plan.outputs().iter().enumerate() {
            tracing::info!("Keep segment {}: {}", i + 1, segment);
        }

        let outcome = self.execute(&workspace, &plan);

        let workdir = if self.options.cleanup {
            if let Err(e) = workspace.cleanup() {
                tracing::warn!("Failed to remove intermediate files: {}", e);
            }
            None
        } else {
            let dir = workspace.persist();
            tracing::info!("Keeping intermediate files in {:?}", dir);
            Some(dir)
        };

        let (placement, backup) = outcome?;

        Ok(TrimReport {
            output: self.destination().to_path_buf(),
            backup,
            workdir,
            segments: plan.outputs().len(),
            placement,
        })
    }

    fn workspace(&self) -> Result<Workspace> {
        Workspace::new(&self.options.input, self.options.workdir.as_deref())
            .context("Failed to create working directory")
    }

    /// Concatenate the segment files into the working directory.
    fn join(&self, workspace: &Workspace, plan: &ExtractPlan) -> Result<PathBuf> {
        let manifest = workspace.manifest_path();
        let joined = workspace.joined_path();

        actions::write_manifest(&manifest, &plan.segment_files())
            .context("Failed to write concat manifest")?;
        actions::concat_segments(&self.ffmpeg, &manifest, &joined, self.options.verbosity)
            .context("Failed to concatenate segments")?;

        Ok(joined)
    }

    fn execute(
        &self,
        workspace: &Workspace,
        plan: &ExtractPlan,
    ) -> Result<(Placement, Option<PathBuf>)> {
        let verbosity = self.options.verbosity;

        actions::extract_segments(&self.ffmpeg, plan, verbosity)
            .context("Failed to extract keep segments")?;

        let backup = if self.replaces_input() && self.options.keep_backup {
            Some(place::backup_original(&self.options.input).context("Failed to save original")?)
        } else {
            None
        };

        // Nothing is written to the destination until the final file exists
        // inside the working directory.
        let dest = self.destination();
        let placed = match plan.outputs() {
            [(_, single)] => Ok(single.clone()),
            _ => self.join(workspace, plan),
        }
        .and_then(|file| place::place_file(&file, dest).context("Failed to place output"));

        match placed {
            Ok(placement) => {
                tracing::info!("Wrote {:?} ({:?})", dest, placement);
                Ok((placement, backup))
            }
            Err(e) => {
                if let Some(ref backup) = backup {
                    // Put the original back
                    if let Err(restore) = std::fs::rename(backup, &self.options.input) {
                        tracing::error!(
                            "Failed to restore original from {:?}: {}",
                            backup,
                            restore
                        );
                    }
                }
                Err(e)
            }
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
