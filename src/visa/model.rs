use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::UserRef;

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaApplication {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: VisaType,
    pub destination: String,
    pub status: VisaStatus,
    pub applicant: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<UserRef>,
    pub passport: PassportDetails,
    pub entry: EntryDetails,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaType {
    Tourist,
    Student,
    Work,
    Family,
}

impl VisaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisaType::Tourist => "TOURIST",
            VisaType::Student => "STUDENT",
            VisaType::Work => "WORK",
            VisaType::Family => "FAMILY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisaType::Tourist => "Tourist",
            VisaType::Student => "Student",
            VisaType::Work => "Work",
            VisaType::Family => "Family reunification",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaStatus {
    Submitted,
    AdditionalInfoRequired,
    Processing,
    Approved,
    Rejected,
}

impl VisaStatus {
    pub const ALL: [VisaStatus; 5] = [
        VisaStatus::Submitted,
        VisaStatus::AdditionalInfoRequired,
        VisaStatus::Processing,
        VisaStatus::Approved,
        VisaStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisaStatus::Submitted => "SUBMITTED",
            VisaStatus::AdditionalInfoRequired => "ADDITIONAL_INFO_REQUIRED",
            VisaStatus::Processing => "PROCESSING",
            VisaStatus::Approved => "APPROVED",
            VisaStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisaStatus::Submitted => "Submitted",
            VisaStatus::AdditionalInfoRequired => "Additional info required",
            VisaStatus::Processing => "Processing",
            VisaStatus::Approved => "Approved",
            VisaStatus::Rejected => "Rejected",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            VisaStatus::Submitted => "blue",
            VisaStatus::AdditionalInfoRequired => "orange",
            VisaStatus::Processing => "purple",
            VisaStatus::Approved => "green",
            VisaStatus::Rejected => "red",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportDetails {
    pub number: String,
    pub nationality: String,
    pub expiry_date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetails {
    pub entry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: String,
}

#[derive(Clone, Debug, Default)]
pub struct VisaFilter {
    pub kind: Option<VisaType>,
    pub status: Option<VisaStatus>,
    pub destination: Option<String>,
}

impl VisaFilter {
    pub(super) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", page.to_string()),
            ("limit", super::PAGE_SIZE.to_string()),
        ];
        if let Some(kind) = self.kind {
            query.push(("type", kind.as_str().to_owned()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_owned()));
        }
        if let Some(destination) = &self.destination {
            query.push(("destination", destination.clone()));
        }
        query
    }
}

/// Create/update payload. Status changes also go through the plain update
/// endpoint; there is no dedicated status route for visas.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDraft {
    #[serde(rename = "type")]
    pub kind: VisaType,
    pub destination: String,
    pub passport: PassportDetails,
    pub entry: EntryDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VisaStatus>,
}
