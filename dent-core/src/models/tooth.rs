use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// FDI numbering scheme a chart is displayed under.
///
/// Adult and pediatric teeth occupy disjoint two-digit ranges, so ledger
/// entries recorded under one scheme are never invalidated by switching the
/// chart to the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberingScheme {
    #[default]
    Adult,
    Pediatric,
}

impl NumberingScheme {
    fn quadrants(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Self::Adult => 1..=4,
            Self::Pediatric => 5..=8,
        }
    }

    fn positions(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Self::Adult => 1..=8,
            Self::Pediatric => 1..=5,
        }
    }

    /// Every tooth number in this scheme, in quadrant/position order.
    pub fn teeth(&self) -> Vec<ToothNumber> {
        self.quadrants()
            .flat_map(|q| self.positions().map(move |p| ToothNumber(q * 10 + p)))
            .collect()
    }
}

/// A validated two-digit FDI tooth identifier.
///
/// The first digit is the quadrant (1-4 adult, 5-8 pediatric), the second
/// the position within it (1-8 adult, 1-5 pediatric). Construction rejects
/// anything outside those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothNumber(u8);

impl ToothNumber {
    pub fn new(number: u8) -> Option<Self> {
        let quadrant = number / 10;
        let position = number % 10;
        let scheme = match quadrant {
            1..=4 => NumberingScheme::Adult,
            5..=8 => NumberingScheme::Pediatric,
            _ => return None,
        };
        scheme.positions().contains(&position).then_some(Self(number))
    }

    pub fn quadrant(&self) -> u8 {
        self.0 / 10
    }

    pub fn position(&self) -> u8 {
        self.0 % 10
    }

    /// The scheme this number belongs to (unambiguous: ranges are disjoint).
    pub fn scheme(&self) -> NumberingScheme {
        if self.quadrant() <= 4 {
            NumberingScheme::Adult
        } else {
            NumberingScheme::Pediatric
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ToothNumber {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| format!("invalid FDI tooth number {number}"))
    }
}

impl From<ToothNumber> for u8 {
    fn from(tooth: ToothNumber) -> u8 {
        tooth.0
    }
}

impl fmt::Display for ToothNumber {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToothNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s
            .parse()
            .map_err(|_| format!("invalid FDI tooth number '{s}'"))?;
        Self::try_from(number)
    }
}

/// One recorded finding for a single tooth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothIssue {
    pub issue: String,
    pub comment: Option<String>,
}
