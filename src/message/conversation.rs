use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};

use crate::user;

use super::model::Message;

/// One row per counterpart in the inbox view. Derived from the raw message
/// feed on every refresh, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub user_id: user::Id,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
}

/// Folds a flat message feed into one conversation per distinct counterpart,
/// sorted by latest activity.
///
/// The input order is irrelevant: the latest message wins through a strict
/// `created_at` comparison, and unread counting is independent of recency.
/// Self-addressed messages never produce a row.
pub fn aggregate(messages: &[Message], me: &user::Id) -> Vec<Conversation> {
    let mut by_counterpart: HashMap<user::Id, Conversation> = HashMap::new();

    for msg in messages {
        if msg.sender.id == *me && msg.recipient.id == *me {
            continue;
        }

        let counterpart = if msg.sender.id == *me {
            &msg.recipient
        } else {
            &msg.sender
        };
        let unread = msg.recipient.id == *me && !msg.is_read;

        match by_counterpart.entry(counterpart.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Conversation {
                    user_id: counterpart.id.clone(),
                    user_name: counterpart.username.clone(),
                    user_avatar: counterpart.avatar.clone(),
                    last_message: msg.content.clone(),
                    last_message_time: msg.created_at,
                    unread_count: unread as u32,
                });
            }
            Entry::Occupied(mut slot) => {
                let conversation = slot.get_mut();
                if msg.created_at > conversation.last_message_time {
                    conversation.last_message = msg.content.clone();
                    conversation.last_message_time = msg.created_at;
                }
                if unread {
                    conversation.unread_count += 1;
                }
            }
        }
    }

    let mut conversations: Vec<Conversation> = by_counterpart.into_values().collect();
    conversations.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
    conversations
}
