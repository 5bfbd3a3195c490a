//! Error types for trimforge-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while trimming a media file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to execute.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A path that has to be written to is not writable.
    #[error("not writable: {}: {reason}", path.display())]
    NotWritable { path: PathBuf, reason: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A time string could not be converted to seconds.
    #[error("invalid time '{input}': {reason}")]
    InvalidTimecode { input: String, reason: String },

    /// A keep segment does not describe a usable range.
    #[error("invalid keep segment: {0}")]
    InvalidSegment(String),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Workspace error.
    #[error("workspace error: {0}")]
    Workspace(String),

    /// Moving or copying the result into place failed.
    #[error("failed to place {} at {}: {reason}", from.display(), to.display())]
    Placement {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a not writable error.
    pub fn not_writable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::NotWritable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid time code error.
    pub fn invalid_timecode(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimecode {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a placement error.
    pub fn placement(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Placement {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}
