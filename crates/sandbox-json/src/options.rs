//! Parser and serializer configuration.
//!
//! Both option sets are plain structs with `Default` values that reproduce
//! the harness behavior. They derive serde traits so a host can load them
//! from its own JSON configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default nesting limit for [`ParseOptions`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Settings for [`parse_with_options`](crate::parse_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest array/object nesting accepted before failing with
    /// [`ParseReason::TooDeep`](crate::ParseReason::TooDeep).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// How numbers are written by the serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Shortest text that parses back to the same `f64`. Non-finite numbers
    /// are written as `null` since JSON has no spelling for them.
    #[default]
    Shortest,
    /// C `printf("%g")`: six significant digits, exponent form outside
    /// `1e-4 ..= 1e6`, trailing zeros removed. Lossy for long mantissas but
    /// byte-compatible with C harness output, including `inf` and `nan`.
    Printf,
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberFormat::Shortest => "shortest",
            NumberFormat::Printf => "printf",
        })
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "shortest" => Ok(NumberFormat::Shortest),
            "printf" | "%g" => Ok(NumberFormat::Printf),
            other => Err(format!(
                "unknown number format '{other}' (expected 'shortest' or 'printf')"
            )),
        }
    }
}

/// Settings for [`serialize_with_options`](crate::serialize_with_options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    pub number_format: NumberFormat,
}

impl SerializeOptions {
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }
}
