//! Builder for running external tool commands.

use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// How much of ffmpeg's own console output is passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Banner suppressed, warnings and errors only.
    #[default]
    Quiet,
    /// Everything ffmpeg prints.
    Verbose,
}

impl Verbosity {
    /// Leading ffmpeg options for this verbosity.
    pub(crate) fn ffmpeg_args(self) -> &'static [&'static str] {
        match self {
            Verbosity::Quiet => &["-hide_banner", "-loglevel", "warning"],
            Verbosity::Verbose => &[],
        }
    }
}

/// A builder for constructing and executing an external tool invocation.
///
/// The child inherits stdout and stderr, so the tool's own progress output
/// reaches the terminal unchanged.
///
/// # Example
///
/// ```no_run
/// use trimforge_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let mut cmd = ToolCommand::new(PathBuf::from("ffmpeg"));
/// cmd.arg("-version");
/// println!("{}", cmd.display());
/// cmd.execute()?;
/// # Ok::<(), trimforge_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// The arguments collected so far.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Render the command line for logs and dry runs.
    ///
    /// Arguments containing whitespace or quotes are single-quoted.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(|a| a.as_os_str()))
            .map(|a| shell_quote(&a.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command and wait for it to finish.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program cannot be spawned because it
    ///   does not exist.
    /// - [`Error::ToolFailed`] if it exits unsuccessfully or is killed by a
    ///   signal.
    pub fn execute(&self) -> Result<()> {
        let name = self.program_name();

        #[cfg(feature = "tracing")]
        tracing::debug!("Running: {}", self.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(name.clone())
                } else {
                    Error::tool_failed(name.clone(), format!("failed to spawn: {}", e))
                }
            })?;

        if !status.success() {
            let message = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(Error::tool_failed(name, message));
        }

        Ok(())
    }
}

/// A file path as ffmpeg should see it.
///
/// Relative paths are made absolute so a name like `intro:part1.mkv` is not
/// read as a `intro:` protocol URL.
pub(crate) fn file_arg(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::path::absolute(path).unwrap_or_else(|_| Path::new(".").join(path))
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@%".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
