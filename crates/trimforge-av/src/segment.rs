//! Keep segments.

use crate::timecode::Timecode;
use crate::{Error, Result};
use std::fmt;

/// A range of the input timeline to retain in the output.
///
/// An `end` of zero means "to end of file".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepSegment {
    pub start: Timecode,
    pub end: Timecode,
}

impl KeepSegment {
    /// Create a segment, rejecting ranges that end before they start.
    pub fn new(start: Timecode, end: Timecode) -> Result<Self> {
        if !end.is_zero() && end <= start {
            return Err(Error::InvalidSegment(format!(
                "end {} is not after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// A segment running from `start` to the end of the input.
    pub fn to_end(start: Timecode) -> Self {
        Self {
            start,
            end: Timecode::ZERO,
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_zero()
    }

    /// Whether two segments share any part of the timeline.
    pub fn overlaps(&self, other: &KeepSegment) -> bool {
        let ends_after = |seg: &KeepSegment, t: Timecode| seg.is_open_ended() || seg.end > t;
        ends_after(self, other.start) && ends_after(other, self.start)
    }
}

impl fmt::Display for KeepSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_ended() {
            write!(f, "{}-EOF", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Pair up the flattened values of repeated `--keep START END` options.
pub fn segments_from_pairs(values: &[Timecode]) -> Result<Vec<KeepSegment>> {
    if values.len() % 2 != 0 {
        return Err(Error::InvalidSegment(
            "every keep segment needs a start and an end".to_string(),
        ));
    }

    let segments = values
        .chunks_exact(2)
        .map(|pair| KeepSegment::new(pair[0], pair[1]))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "tracing")]
    if !is_ordered_and_disjoint(&segments) {
        tracing::warn!("Keep segments are out of order or overlap; keeping command-line order");
    }

    Ok(segments)
}

/// Whether segments appear in timeline order without sharing any time.
pub fn is_ordered_and_disjoint(segments: &[KeepSegment]) -> bool {
    let ordered = segments.windows(2).all(|w| w[0].start <= w[1].start);
    let disjoint = segments
        .iter()
        .enumerate()
        .all(|(i, a)| segments[i + 1..].iter().all(|b| !a.overlaps(b)));
    ordered && disjoint
}
