use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an application stands. Transitions are unconstrained; a record can
/// move between any two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Status {
    Submitted,
    UnderReview,
    Interview,
    Rejected,
    Offer,
    Archived,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::UnderReview => "under_review",
            Status::Interview => "interview",
            Status::Rejected => "rejected",
            Status::Offer => "offer",
            Status::Archived => "archived",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Submitted
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps width specifiers working in table output
        f.pad(self.as_str())
    }
}

/// One tracked job application. Field names serialize camelCase to match the
/// backend's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    /// Store-assigned, immutable, never reused.
    pub id: String,
    pub site: String,
    pub position_title: String,
    pub company: String,
    pub application_date: Option<NaiveDate>,
    pub status: Status,
    #[serde(default)]
    pub response_notes: String,
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub job_posting_text: String,
    pub job_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stamped by the store on every create or update.
    pub last_updated: NaiveDate,
}

impl JobApplication {
    /// Date used for ordering: the application date when present, otherwise
    /// the last mutation date.
    pub fn effective_date(&self) -> NaiveDate {
        self.application_date.unwrap_or(self.last_updated)
    }
}

/// Input to `create`: everything except the store-assigned fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub site: String,
    pub position_title: String,
    pub company: String,
    /// Defaults to today when omitted.
    pub application_date: Option<NaiveDate>,
    pub status: Status,
    #[serde(default)]
    pub response_notes: String,
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub job_posting_text: String,
    pub job_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update: absent fields leave the record untouched. The id can
/// never be changed through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_notes: Option<String>,
    /// `Some(None)` clears a scheduled interview; `None` leaves it alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_posting_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    /// Replaces the whole tag list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
