use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by treatments and individual treatment plans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreatmentStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl TreatmentStatus {
    /// The wire code used by the practice API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Human-readable label for review screens.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TreatmentStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_wire_code() {
        assert_eq!(TreatmentStatus::parse("pending"), Some(TreatmentStatus::Pending));
        assert_eq!(
            TreatmentStatus::parse("in-progress"),
            Some(TreatmentStatus::InProgress)
        );
        assert_eq!(
            TreatmentStatus::parse("completed"),
            Some(TreatmentStatus::Completed)
        );
        assert_eq!(
            TreatmentStatus::parse("cancelled"),
            Some(TreatmentStatus::Cancelled)
        );
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(TreatmentStatus::parse("archived"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in [
            TreatmentStatus::Pending,
            TreatmentStatus::InProgress,
            TreatmentStatus::Completed,
            TreatmentStatus::Cancelled,
        ] {
            assert_eq!(TreatmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn default_is_pending() {
        assert_eq!(TreatmentStatus::default(), TreatmentStatus::Pending);
    }
}
