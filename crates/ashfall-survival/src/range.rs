//! Interval strings used as keys in the attribute effect tables.
//!
//! The grammar is `<open><lo>,<hi><close>`: `[` or `(` opens the interval
//! (inclusive or exclusive), `]` or `)` closes it, and `-` in place of a
//! bound leaves that side unbounded. `"[-,25]"` is every value up to and
//! including 25, `"(75,-]"` is everything above 75.

use core::ops::Bound;
use core::str::FromStr;

/// Reasons a range string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    /// The string does not start with `[` or `(`.
    #[error("range must start with '[' or '('")]
    MissingOpen,

    /// The string does not end with `]` or `)`.
    #[error("range must end with ']' or ')'")]
    MissingClose,

    /// There is no comma between the bounds.
    #[error("range must contain a ',' between its bounds")]
    MissingSeparator,

    /// A bound is neither `-` nor a finite number.
    #[error("invalid bound {bound:?}")]
    InvalidBound {
        /// The offending bound text.
        bound: String,
    },
}

/// A parsed interval over attribute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl Range {
    /// Whether `value` lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.lower {
            Bound::Included(lo) => value >= lo,
            Bound::Excluded(lo) => value > lo,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(hi) => value <= hi,
            Bound::Excluded(hi) => value < hi,
            Bound::Unbounded => true,
        };
        above && below
    }

    /// The lower bound.
    pub const fn lower(&self) -> Bound<f64> {
        self.lower
    }

    /// The upper bound.
    pub const fn upper(&self) -> Bound<f64> {
        self.upper
    }
}

fn parse_bound(text: &str) -> Result<Option<f64>, RangeParseError> {
    let text = text.trim();
    if text == "-" {
        return Ok(None);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| RangeParseError::InvalidBound {
            bound: text.to_owned(),
        })
}

impl FromStr for Range {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (lower_inclusive, rest) = if let Some(rest) = s.strip_prefix('[') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('(') {
            (false, rest)
        } else {
            return Err(RangeParseError::MissingOpen);
        };
        let (upper_inclusive, inner) = if let Some(inner) = rest.strip_suffix(']') {
            (true, inner)
        } else if let Some(inner) = rest.strip_suffix(')') {
            (false, inner)
        } else {
            return Err(RangeParseError::MissingClose);
        };
        let (lo, hi) = inner
            .split_once(',')
            .ok_or(RangeParseError::MissingSeparator)?;

        let lower = match parse_bound(lo)? {
            None => Bound::Unbounded,
            Some(v) if lower_inclusive => Bound::Included(v),
            Some(v) => Bound::Excluded(v),
        };
        let upper = match parse_bound(hi)? {
            None => Bound::Unbounded,
            Some(v) if upper_inclusive => Bound::Included(v),
            Some(v) => Bound::Excluded(v),
        };
        Ok(Self { lower, upper })
    }
}
