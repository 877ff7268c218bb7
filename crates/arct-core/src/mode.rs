//! Permission mode applied to a retrieved file.
//!
//! Textual modes are always octal: `"755"` means `0o755`, never decimal 755.

use std::fmt;
use std::str::FromStr;

/// Highest value accepted: setuid/setgid/sticky plus rwx for all.
const MAX_MODE: u32 = 0o7777;

/// Unix permission bits (`0..=0o7777`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(u32);

/// Text that does not describe an octal permission mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mode {text:?}: expected octal permission bits such as 755 or 0o644")]
pub struct ModeParseError {
    pub text: String,
}

impl FileMode {
    /// Wraps raw permission bits, rejecting values above `0o7777`.
    pub fn new(bits: u32) -> Option<Self> {
        (bits <= MAX_MODE).then_some(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl FromStr for FileMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ModeParseError {
            text: s.to_string(),
        };
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(err());
        }
        let bits = u32::from_str_radix(digits, 8).map_err(|_| err())?;
        FileMode::new(bits).ok_or_else(err)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}
