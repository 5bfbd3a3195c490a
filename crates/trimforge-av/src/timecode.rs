//! Time string parsing.
//!
//! Keep segments are given on the command line as `H:M:S`, `M:S` or plain
//! seconds. Only whole seconds are supported.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Convert a `H:M:S`, `M:S` or `S` string to whole seconds.
///
/// Components are not range-checked, so `"0:90"` is 90 seconds.
///
/// # Example
///
/// ```
/// use trimforge_av::timecode::parse_seconds;
///
/// assert_eq!(parse_seconds("1:02:03")?, 3723);
/// assert_eq!(parse_seconds("4:05")?, 245);
/// assert_eq!(parse_seconds("42")?, 42);
/// assert!(parse_seconds("1.5").is_err());
/// # Ok::<(), trimforge_av::Error>(())
/// ```
pub fn parse_seconds(s: &str) -> Result<u64> {
    if s.is_empty() {
        return Err(Error::invalid_timecode(s, "empty time"));
    }

    if let Some(c) = s.chars().find(|c| !c.is_ascii_digit() && *c != ':') {
        return Err(Error::invalid_timecode(
            s,
            format!("unexpected character '{}'", c),
        ));
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return Err(Error::invalid_timecode(
            s,
            "expected at most three components (H:M:S)",
        ));
    }

    let mut total: u64 = 0;
    for part in parts {
        if part.is_empty() {
            return Err(Error::invalid_timecode(s, "empty component"));
        }
        let value: u64 = part
            .parse()
            .map_err(|_| Error::invalid_timecode(s, "value out of range"))?;
        total = total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(|| Error::invalid_timecode(s, "value out of range"))?;
    }

    Ok(total)
}

/// Render whole seconds as `H:MM:SS`.
pub fn format_seconds(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// A point in the input timeline, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode(u64);

impl Timecode {
    /// The zero time code. As a segment end it means "end of file".
    pub const ZERO: Timecode = Timecode(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Timecode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_seconds(s).map(Timecode)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_seconds(self.0))
    }
}
