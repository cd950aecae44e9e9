use std::{fmt, str::FromStr};

use crate::util::{Result, Status};

pub const SEPARATOR: char = '.';
pub const WILDCARD: &str = "*";

/// One dot-delimited unit of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Direct field or key lookup
    Literal(String),
    /// Any key of the table at this position
    Wildcard,
}

impl Segment {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

/// Parsed dotted path pattern such as `services.*.ports.*`
///
/// Immutable once parsed. Contains at least one segment and no empty
/// segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
    wildcards: usize,
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Pattern> {
        if pattern.is_empty() {
            return Err(Status::invalid_argument("empty pattern"));
        }

        let mut segments = Vec::new();
        let mut wildcards = 0;
        for (i, part) in pattern.split(SEPARATOR).enumerate() {
            if part.is_empty() {
                return Err(Status::invalid_argument(format!(
                    "empty segment {i} in pattern {pattern:?}"
                )));
            }
            if part == WILDCARD {
                wildcards += 1;
                segments.push(Segment::Wildcard);
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Pattern {
            segments,
            wildcards,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a parsed pattern
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn wildcard_count(&self) -> usize {
        self.wildcards
    }

    /// True when the pattern names exactly one path
    pub fn is_literal(&self) -> bool {
        self.wildcards == 0
    }
}

impl FromStr for Pattern {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            match segment {
                Segment::Literal(name) => write!(f, "{name}")?,
                Segment::Wildcard => write!(f, "{WILDCARD}")?,
            }
        }
        Ok(())
    }
}
