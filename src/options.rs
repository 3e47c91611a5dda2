//! Extraction options shared by the plain and the cached entry points.
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Default lookback for function and method declarations.
pub const DEFAULT_FUNC_LOOKBACK: usize = 10;
/// Default lookback for `type`, `const` and `var` specs.
pub const DEFAULT_DECL_LOOKBACK: usize = 5;
/// File identifier used for literal source input.
pub const DEFAULT_LITERAL_NAME: &str = "code.go";

/// How far above a declaration's owning line doc comments may be taken from.
///
/// Deserializes from an integer or from the string `"unbounded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "LookbackRepr")]
pub enum Lookback {
    Lines(usize),
    Unbounded,
}

impl Lookback {
    /// Lowest line a candidate may sit on for an anchor at `owning`.
    pub fn floor(self, owning: usize) -> usize {
        match self {
            Lookback::Lines(n) => owning.saturating_sub(n).max(1),
            Lookback::Unbounded => 1,
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookback::Lines(n) => write!(f, "{n}"),
            Lookback::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(Lookback::Unbounded);
        }
        s.parse::<usize>()
            .map(Lookback::Lines)
            .map_err(|_| format!("invalid lookback '{s}': expected a line count or 'unbounded'"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LookbackRepr {
    Lines(usize),
    Keyword(String),
}

impl TryFrom<LookbackRepr> for Lookback {
    type Error = String;

    fn try_from(repr: LookbackRepr) -> Result<Self, Self::Error> {
        match repr {
            LookbackRepr::Lines(n) => Ok(Lookback::Lines(n)),
            LookbackRepr::Keyword(word) => word.parse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Lookback for function and method doc blocks.
    pub func_lookback: Lookback,
    /// Lookback for `type`, `const` and `var` doc blocks.
    pub decl_lookback: Lookback,
    /// File identifier for literal source input.
    pub literal_name: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            func_lookback: Lookback::Lines(DEFAULT_FUNC_LOOKBACK),
            decl_lookback: Lookback::Lines(DEFAULT_DECL_LOOKBACK),
            literal_name: DEFAULT_LITERAL_NAME.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Options with no lookback bound, for callers that want whole doc blocks.
    pub fn unbounded() -> Self {
        Self {
            func_lookback: Lookback::Unbounded,
            decl_lookback: Lookback::Unbounded,
            ..Self::default()
        }
    }
}
