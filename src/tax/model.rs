use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::UserRef;

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCase {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: TaxType,
    pub fiscal_year: u16,
    pub status: TaxStatus,
    pub client: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_professional: Option<UserRef>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub fiscal: FiscalSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxType {
    IncomeTax,
    PropertyTax,
    Vat,
    Other,
}

impl TaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::IncomeTax => "INCOME_TAX",
            TaxType::PropertyTax => "PROPERTY_TAX",
            TaxType::Vat => "VAT",
            TaxType::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxType::IncomeTax => "Income tax",
            TaxType::PropertyTax => "Property tax",
            TaxType::Vat => "VAT",
            TaxType::Other => "Other",
        }
    }
}

/// Case lifecycle. The client-side gate offers the full enumeration to any
/// caller allowed to change status at all; no transition graph is enforced
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxStatus {
    Pending,
    InProgress,
    RevisionNeeded,
    Completed,
    Cancelled,
}

impl TaxStatus {
    pub const ALL: [TaxStatus; 5] = [
        TaxStatus::Pending,
        TaxStatus::InProgress,
        TaxStatus::RevisionNeeded,
        TaxStatus::Completed,
        TaxStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxStatus::Pending => "PENDING",
            TaxStatus::InProgress => "IN_PROGRESS",
            TaxStatus::RevisionNeeded => "REVISION_NEEDED",
            TaxStatus::Completed => "COMPLETED",
            TaxStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxStatus::Pending => "Pending",
            TaxStatus::InProgress => "In progress",
            TaxStatus::RevisionNeeded => "Revision needed",
            TaxStatus::Completed => "Completed",
            TaxStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TaxStatus::Pending => "orange",
            TaxStatus::InProgress => "blue",
            TaxStatus::RevisionNeeded => "purple",
            TaxStatus::Completed => "green",
            TaxStatus::Cancelled => "red",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalSummary {
    pub total_income: f64,
    pub total_deductions: f64,
    pub tax_due: f64,
}

#[derive(Clone, Debug, Default)]
pub struct TaxFilter {
    pub kind: Option<TaxType>,
    pub status: Option<TaxStatus>,
    pub fiscal_year: Option<u16>,
}

impl TaxFilter {
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
        if let Some(year) = self.fiscal_year {
            query.push(("fiscalYear", year.to_string()));
        }
        query
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCaseDraft {
    #[serde(rename = "type")]
    pub kind: TaxType,
    pub fiscal_year: u16,
    pub fiscal: FiscalSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}
