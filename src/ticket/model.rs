use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::UserRef;

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Id,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: TicketStatus,
    pub user: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub messages: Vec<ThreadMessage>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// One entry of the append-only ticket thread. `kind` is an explicit
/// discriminant set server-side at creation; older records without it decode
/// as regular user messages.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub sender: UserRef,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub kind: MessageKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    User,
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    General,
    Technical,
    Billing,
    Account,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "GENERAL",
            Category::Technical => "TECHNICAL",
            Category::Billing => "BILLING",
            Category::Account => "ACCOUNT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Technical => "Technical",
            Category::Billing => "Billing",
            Category::Account => "Account",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::Low => "gray",
            Priority::Medium => "blue",
            Priority::High => "orange",
            Priority::Urgent => "red",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TicketStatus::Open => "blue",
            TicketStatus::InProgress => "orange",
            TicketStatus::Resolved => "green",
            TicketStatus::Closed => "gray",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl TicketFilter {
    pub(super) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", page.to_string()),
            ("limit", super::PAGE_SIZE.to_string()),
        ];
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_owned()));
        }
        if let Some(priority) = self.priority {
            query.push(("priority", priority.as_str().to_owned()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.as_str().to_owned()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub subject: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}
