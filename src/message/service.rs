use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::state::Store;
use crate::user;

use super::Id;
use super::api::MessageApi;
use super::conversation::{self, Conversation};
use super::model::Message;

#[derive(Clone, Default)]
pub struct Feed {
    pub messages: Vec<Message>,
    pub conversations: Vec<Conversation>,
}

/// Owns the raw message feed and its derived conversation list. Every change
/// to the feed re-runs the aggregation; mutations only touch local state
/// after the server confirmed them.
#[derive(Clone)]
pub struct MessageService {
    api: MessageApi,
    me: user::Id,
    store: Arc<Store<Feed>>,
}

impl MessageService {
    pub fn new(api: MessageApi, me: user::Id) -> Self {
        Self {
            api,
            me,
            store: Arc::new(Store::default()),
        }
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.store.read(|feed| feed.conversations.clone())
    }

    pub fn messages_with(&self, counterpart: &user::Id) -> Vec<Message> {
        self.store.read(|feed| {
            feed.messages
                .iter()
                .filter(|m| m.in_thread(&self.me, counterpart))
                .cloned()
                .collect()
        })
    }
}

impl MessageService {
    /// Re-fetches the thread with `counterpart` and merges it into the feed.
    /// A snapshot that raced with a confirmed mutation is discarded; the
    /// version check in the store decides, not arrival order.
    pub async fn refresh(&self, counterpart: &user::Id) -> super::Result<Vec<Conversation>> {
        let observed = self.store.version();
        let incoming = self.api.conversation(counterpart).await?;

        let me = self.me.clone();
        let applied = self.store.reconcile(observed, |feed| {
            feed.messages.retain(|m| !m.in_thread(&me, counterpart));
            feed.messages.extend(incoming);
            feed.conversations = conversation::aggregate(&feed.messages, &me);
            feed.conversations.clone()
        });

        Ok(applied.unwrap_or_else(|| self.conversations()))
    }

    pub async fn send(
        &self,
        recipient: &user::Id,
        content: &str,
        attachments: &[String],
    ) -> super::Result<Message> {
        let sent = self.api.send(recipient, content, attachments).await?;
        self.merge(sent.clone());
        Ok(sent)
    }

    pub async fn mark_read(&self, id: &Id) -> super::Result<Message> {
        let updated = self.api.mark_read(id).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn add_attachments(&self, id: &Id, attachments: &[String]) -> super::Result<Message> {
        let updated = self.api.add_attachments(id, attachments).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        self.api.delete(id).await?;

        let me = self.me.clone();
        self.store.update(|feed| {
            feed.messages.retain(|m| m.id != *id);
            feed.conversations = conversation::aggregate(&feed.messages, &me);
        });
        Ok(())
    }

    fn merge(&self, message: Message) {
        let me = self.me.clone();
        self.store.update(|feed| {
            match feed.messages.iter_mut().find(|m| m.id == message.id) {
                Some(slot) => *slot = message,
                None => feed.messages.push(message),
            }
            feed.conversations = conversation::aggregate(&feed.messages, &me);
        });
    }
}

/// Aborts the poll task when the view owning it is torn down.
pub struct PollHandle(JoinHandle<()>);

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl MessageService {
    /// Background refresh of the active thread at a fixed interval. In-flight
    /// requests are not aborted on teardown; only the loop stops.
    pub fn spawn_poll(&self, counterpart: user::Id, every: Duration) -> PollHandle {
        let service = self.clone();
        PollHandle(tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                if let Err(e) = service.refresh(&counterpart).await {
                    warn!("conversation poll failed: {e}");
                }
            }
        }))
    }
}
