//! Quoting modes
//!
//! The four standard CSV quoting policies. The integer codes 0-3 are the ones
//! test suites already pass around, so they parse alongside the names.

use crate::types::CsvError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy controlling which fields are wrapped in quote characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Quote only fields containing the delimiter, a quote or a line break
    #[default]
    Minimal,
    /// Quote every field
    All,
    /// Quote every field that is not a number
    NonNumeric,
    /// Never quote; quote characters are plain data when reading
    None,
}

impl Quoting {
    /// Writer-side quote style
    pub fn quote_style(self) -> csv::QuoteStyle {
        match self {
            Quoting::Minimal => csv::QuoteStyle::Necessary,
            Quoting::All => csv::QuoteStyle::Always,
            Quoting::NonNumeric => csv::QuoteStyle::NonNumeric,
            Quoting::None => csv::QuoteStyle::Never,
        }
    }

    /// Whether the reader should treat quote characters as quoting
    pub fn reads_quotes(self) -> bool {
        !matches!(self, Quoting::None)
    }
}

impl TryFrom<u8> for Quoting {
    type Error = CsvError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Quoting::Minimal),
            1 => Ok(Quoting::All),
            2 => Ok(Quoting::NonNumeric),
            3 => Ok(Quoting::None),
            _ => Err(CsvError::InvalidQuoting {
                value: code.to_string(),
            }),
        }
    }
}

impl FromStr for Quoting {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if let Ok(code) = value.parse::<u8>() {
            return Quoting::try_from(code);
        }
        match value.to_lowercase().as_str() {
            "minimal" => Ok(Quoting::Minimal),
            "all" => Ok(Quoting::All),
            "nonnumeric" | "non-numeric" | "non_numeric" => Ok(Quoting::NonNumeric),
            "none" => Ok(Quoting::None),
            _ => Err(CsvError::InvalidQuoting {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Quoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quoting::Minimal => "minimal",
            Quoting::All => "all",
            Quoting::NonNumeric => "nonnumeric",
            Quoting::None => "none",
        };
        f.write_str(name)
    }
}
