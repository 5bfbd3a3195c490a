//! # trimforge-av
//!
//! ffmpeg plumbing for cutting keep segments out of a video file.
//!
//! This crate provides functionality for:
//! - Parsing `H:M:S` time strings and pairing them into keep segments
//! - Locating the ffmpeg binary
//! - Managing the working directory for intermediate files
//! - Extracting segments and concatenating them with stream copy
//! - Placing the result by rename or copy
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use trimforge_av::{actions, segments_from_pairs, Timecode, Verbosity, Workspace};
//! use std::path::Path;
//!
//! let input = Path::new("/path/to/video.mkv");
//! let values: Vec<Timecode> = ["0:30", "2:00"]
//!     .iter()
//!     .map(|s| s.parse())
//!     .collect::<Result<_, _>>()?;
//! let segments = segments_from_pairs(&values)?;
//!
//! let workspace = Workspace::new(input, None)?;
//! let plan = actions::ExtractPlan::new(input, &segments, &workspace)?;
//! actions::extract_segments(Path::new("ffmpeg"), &plan, Verbosity::Quiet)?;
//! # Ok::<(), trimforge_av::Error>(())
//! ```

pub mod actions;
pub mod command;
mod error;
pub mod place;
pub mod segment;
pub mod timecode;
pub mod tools;
pub mod validate;
pub mod workspace;

// Re-exports
pub use command::{ToolCommand, Verbosity};
pub use error::{Error, Result};
pub use place::Placement;
pub use segment::{segments_from_pairs, KeepSegment};
pub use timecode::Timecode;
pub use tools::{check_ffmpeg, get_tool_path, require_tool, ToolInfo};
pub use workspace::Workspace;
