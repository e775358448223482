//! Parsing code points from the command line

use std::str::FromStr;

/// A Unicode scalar position given as `U+XXXX`, `0xXXXX` or decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePoint(pub u32);

impl FromStr for CodePoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"));
        let value = match hex {
            Some(digits) => u32::from_str_radix(digits, 16),
            None => s.parse(),
        }
        .map_err(|e| format!("invalid code point '{}': {e}", s.escape_default()))?;
        if value > bitfont::types::MAX_CODE_POINT {
            return Err(format!("code point {value:#X} is beyond U+10FFFF"));
        }
        Ok(CodePoint(value))
    }
}

impl std::fmt::Display for CodePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}
