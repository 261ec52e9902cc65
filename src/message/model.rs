use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::User;

use super::Id;

/// A directed message. Immutable once sent apart from `is_read` flips and
/// attachment appends, both of which come back as a fresh server copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Id,
    pub sender: User,
    pub recipient: User,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub is_read: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message belongs to the thread between `me` and
    /// `counterpart`, in either direction.
    pub fn in_thread(&self, me: &crate::user::Id, counterpart: &crate::user::Id) -> bool {
        (self.sender.id == *me && self.recipient.id == *counterpart)
            || (self.sender.id == *counterpart && self.recipient.id == *me)
    }
}
