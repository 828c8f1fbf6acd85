//! Dupe check modes
//!
//! Modes of the `SITE XDUPE` extension, which makes a server report files that
//! already exist when a STOR is refused as a duplicate.

use std::fmt;

/// Extended dupe checking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DupeCheckMode {
    /// Extended dupe checking off
    Disabled,
    /// Several file names per X-DUPE line
    MultiplePerLine,
    /// One file name per X-DUPE line
    OnePerLine,
    /// One file name per X-DUPE line, never truncated
    OnePerLineUntruncated,
    /// All file names on one line, up to 1024 characters
    SingleLine,
}

impl DupeCheckMode {
    /// Numeric value sent with `SITE XDUPE`.
    pub fn value(self) -> u8 {
        match self {
            DupeCheckMode::Disabled => 0,
            DupeCheckMode::MultiplePerLine => 1,
            DupeCheckMode::OnePerLine => 2,
            DupeCheckMode::OnePerLineUntruncated => 3,
            DupeCheckMode::SingleLine => 4,
        }
    }
}

impl TryFrom<u8> for DupeCheckMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DupeCheckMode::Disabled),
            1 => Ok(DupeCheckMode::MultiplePerLine),
            2 => Ok(DupeCheckMode::OnePerLine),
            3 => Ok(DupeCheckMode::OnePerLineUntruncated),
            4 => Ok(DupeCheckMode::SingleLine),
            other => Err(other),
        }
    }
}

impl fmt::Display for DupeCheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
