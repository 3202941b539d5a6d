//! Represents a reported bug and its two closed choice fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Raised when a string is not one of a choice field's wire values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not one of the available choices", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

/// A `(value, label)` pair rendered as an `<option>` in the register form.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Kind of report.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
pub enum BugType {
    #[serde(rename = "error")]
    #[sqlx(rename = "error")]
    Error,
    #[serde(rename = "new_feature")]
    #[sqlx(rename = "new_feature")]
    NewFeature,
    #[serde(rename = "enhancement")]
    #[sqlx(rename = "enhancement")]
    Enhancement,
    #[serde(rename = "other")]
    #[sqlx(rename = "other")]
    Other,
}

impl BugType {
    pub const ALL: [BugType; 4] = [
        BugType::Error,
        BugType::NewFeature,
        BugType::Enhancement,
        BugType::Other,
    ];

    /// Value stored in the database and submitted by the form.
    pub fn as_str(self) -> &'static str {
        match self {
            BugType::Error => "error",
            BugType::NewFeature => "new_feature",
            BugType::Enhancement => "enhancement",
            BugType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            BugType::Error => "Error",
            BugType::NewFeature => "New Feature",
            BugType::Enhancement => "Enhancement",
            BugType::Other => "Other",
        }
    }

    pub fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .map(|t| Choice {
                value: t.as_str(),
                label: t.label(),
            })
            .collect()
    }
}

impl FromStr for BugType {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// Workflow status. There is no transition logic, only a flat label.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
pub enum BugStatus {
    #[serde(rename = "todo")]
    #[sqlx(rename = "todo")]
    Todo,
    #[serde(rename = "inprogress")]
    #[sqlx(rename = "inprogress")]
    InProgress,
    #[serde(rename = "done")]
    #[sqlx(rename = "done")]
    Done,
}

impl BugStatus {
    pub const ALL: [BugStatus; 3] = [BugStatus::Todo, BugStatus::InProgress, BugStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            BugStatus::Todo => "todo",
            BugStatus::InProgress => "inprogress",
            BugStatus::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BugStatus::Todo => "To Do",
            BugStatus::InProgress => "In Progress",
            BugStatus::Done => "Done",
        }
    }

    pub fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .map(|s| Choice {
                value: s.as_str(),
                label: s.label(),
            })
            .collect()
    }
}

impl FromStr for BugStatus {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// A persisted bug report.
///
/// Rows are created once through the register form and never edited or
/// removed afterwards.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Bug {
    /// Primary key assigned by SQLite.
    pub id: i64,

    /// Free-text description of the problem or request.
    pub description: String,

    /// Kind of report (error, new feature, ...).
    pub bug_type: BugType,

    /// Calendar day the bug was reported.
    pub report_date: NaiveDate,

    /// Current status label.
    pub status: BugStatus,
}

impl fmt::Display for Bug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Validated input for a bug that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBug {
    pub description: String,
    pub bug_type: BugType,
    pub report_date: NaiveDate,
    pub status: BugStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bug_type_parses_every_wire_value() {
        for t in BugType::ALL {
            assert_eq!(t.as_str().parse::<BugType>(), Ok(t));
        }
        assert_eq!(
            "critical".parse::<BugType>(),
            Err(InvalidChoice("critical".into()))
        );
    }

    #[test]
    fn status_rejects_label_text() {
        assert_eq!("inprogress".parse::<BugStatus>(), Ok(BugStatus::InProgress));
        assert!("In Progress".parse::<BugStatus>().is_err());
        assert!("".parse::<BugStatus>().is_err());
    }

    #[test]
    fn choices_follow_declaration_order() {
        let labels: Vec<_> = BugType::choices().iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Error", "New Feature", "Enhancement", "Other"]);

        let values: Vec<_> = BugStatus::choices().iter().map(|c| c.value).collect();
        assert_eq!(values, ["todo", "inprogress", "done"]);
    }

    #[test]
    fn display_is_description() {
        let bug = Bug {
            id: 1,
            description: "Another Bug".into(),
            bug_type: BugType::NewFeature,
            report_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            status: BugStatus::InProgress,
        };
        assert_eq!(bug.to_string(), "Another Bug");
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&BugStatus::InProgress).unwrap();
        assert_eq!(json, "\"inprogress\"");
        let t: BugType = serde_json::from_str("\"new_feature\"").unwrap();
        assert_eq!(t, BugType::NewFeature);
    }
}
