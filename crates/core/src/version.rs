//! Normalized server versions and version ranges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized (major, minor, patch) server release
///
/// Ordering is lexicographic over the three fields, so `1.8.8 < 1.9 < 1.19.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionIdentifier {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl VersionIdentifier {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

/// Strict `major.minor[.patch]` form
///
/// Only the canonical dotted form is accepted here; the host-specific
/// formats are handled by the version detector.
impl FromStr for VersionIdentifier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(format!("expected major.minor[.patch], got {:?}", s));
        }

        let mut numbers = [0u16; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("non-numeric version component {:?}", part));
            }
            *slot = part
                .parse()
                .map_err(|_| format!("version component {:?} out of range", part))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// Upper end of a [`VersionRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpperBound {
    /// Versions strictly below the bound
    Exclusive(VersionIdentifier),
    /// Versions up to and including the bound
    Inclusive(VersionIdentifier),
    /// No upper limit
    Unbounded,
}

/// Range of server versions handled by one adapter
///
/// The lower bound is always inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    pub lower: VersionIdentifier,
    pub upper: UpperBound,
}

impl VersionRange {
    /// `[lower, upper)`
    pub const fn half_open(lower: VersionIdentifier, upper: VersionIdentifier) -> Self {
        Self {
            lower,
            upper: UpperBound::Exclusive(upper),
        }
    }

    /// `[lower, upper]`
    pub const fn closed(lower: VersionIdentifier, upper: VersionIdentifier) -> Self {
        Self {
            lower,
            upper: UpperBound::Inclusive(upper),
        }
    }

    /// `[lower, ∞)`
    pub const fn at_least(lower: VersionIdentifier) -> Self {
        Self {
            lower,
            upper: UpperBound::Unbounded,
        }
    }

    /// Whether the range contains no version at all
    pub fn is_empty(&self) -> bool {
        match self.upper {
            UpperBound::Exclusive(upper) => upper <= self.lower,
            UpperBound::Inclusive(upper) => upper < self.lower,
            UpperBound::Unbounded => false,
        }
    }

    pub fn contains(&self, version: VersionIdentifier) -> bool {
        if version < self.lower {
            return false;
        }
        match self.upper {
            UpperBound::Exclusive(upper) => version < upper,
            UpperBound::Inclusive(upper) => version <= upper,
            UpperBound::Unbounded => true,
        }
    }

    /// Whether the versions strictly above this range start at or after `version`
    ///
    /// i.e. no member of this range is `>= version`.
    pub fn ends_before(&self, version: VersionIdentifier) -> bool {
        match self.upper {
            UpperBound::Exclusive(upper) => upper <= version,
            UpperBound::Inclusive(upper) => upper < version,
            UpperBound::Unbounded => false,
        }
    }

    /// Whether the two ranges share at least one version
    pub fn overlaps(&self, other: &VersionRange) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.ends_before(other.lower) || other.ends_before(self.lower))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            UpperBound::Exclusive(upper) => write!(f, "[{}, {})", self.lower, upper),
            UpperBound::Inclusive(upper) => write!(f, "[{}, {}]", self.lower, upper),
            UpperBound::Unbounded => write!(f, "[{}, ∞)", self.lower),
        }
    }
}
