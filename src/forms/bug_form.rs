//! The bug register form: raw submitted values, their validation into a
//! [`NewBug`], and the per-field error set re-shown to the user on failure.

use crate::models::bug::{BugStatus, BugType, Choice, NewBug};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_DATE: &str = "Enter a valid date.";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field values as submitted by the browser.
///
/// Every field is optional here so a missing value surfaces as a field error
/// instead of an extractor rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BugForm {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bug_type: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Field name -> messages, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

fn invalid_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// Trimmed value, or `None` when absent or blank.
fn cleaned(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl BugForm {
    /// Validate all fields, collecting every error before returning.
    pub fn validate(&self) -> Result<NewBug, FieldErrors> {
        let mut errors = FieldErrors::default();

        let description = cleaned(&self.description);
        if description.is_none() {
            errors.add("description", REQUIRED);
        }

        let bug_type = match cleaned(&self.bug_type) {
            None => {
                errors.add("bug_type", REQUIRED);
                None
            }
            Some(raw) => match raw.parse::<BugType>() {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.add("bug_type", invalid_choice(raw));
                    None
                }
            },
        };

        let report_date = match cleaned(&self.report_date) {
            None => {
                errors.add("report_date", REQUIRED);
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("report_date", INVALID_DATE);
                    None
                }
            },
        };

        let status = match cleaned(&self.status) {
            None => {
                errors.add("status", REQUIRED);
                None
            }
            Some(raw) => match raw.parse::<BugStatus>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.add("status", invalid_choice(raw));
                    None
                }
            },
        };

        match (description, bug_type, report_date, status) {
            (Some(description), Some(bug_type), Some(report_date), Some(status))
                if errors.is_empty() =>
            {
                Ok(NewBug {
                    description: description.to_string(),
                    bug_type,
                    report_date,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Submitted values as plain strings for re-display; absent fields are empty.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FormValues {
    pub description: String,
    pub bug_type: String,
    pub report_date: String,
    pub status: String,
}

impl From<BugForm> for FormValues {
    fn from(form: BugForm) -> Self {
        Self {
            description: form.description.unwrap_or_default(),
            bug_type: form.bug_type.unwrap_or_default(),
            report_date: form.report_date.unwrap_or_default(),
            status: form.status.unwrap_or_default(),
        }
    }
}

/// Everything the register template needs to draw the form.
#[derive(Debug, Serialize)]
pub struct BugFormContext {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub bug_types: Vec<Choice>,
    pub statuses: Vec<Choice>,
}

impl BugFormContext {
    /// An unbound form for the initial GET.
    pub fn empty() -> Self {
        Self::bound(BugForm::default(), FieldErrors::default())
    }

    /// A form re-populated with the user's input and its errors.
    pub fn bound(values: BugForm, errors: FieldErrors) -> Self {
        Self {
            values: values.into(),
            errors,
            bug_types: BugType::choices(),
            statuses: BugStatus::choices(),
        }
    }
}
