//! ffmpeg invocations used by a trim.
//!
//! - Extraction of every keep segment in one pass
//! - Concatenation of the extracted parts through the concat demuxer

mod concat;
mod extract;

pub use concat::{concat_command, concat_segments, manifest_contents, write_manifest};
pub use extract::{extract_command, extract_segments, ExtractPlan};
