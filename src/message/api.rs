use serde::{Deserialize, Serialize};

use crate::api::{self, Client};
use crate::user;

use super::Id;
use super::model::Message;

#[derive(Clone)]
pub struct MessageApi {
    client: Client,
}

#[derive(Deserialize)]
struct MessagePayload {
    data: Message,
}

impl MessageApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn conversation(&self, counterpart: &user::Id) -> super::Result<Vec<Message>> {
        #[derive(Deserialize)]
        struct Payload {
            messages: Vec<Message>,
        }

        let payload: Payload = self
            .client
            .get(&format!("/api/messages/conversation/{counterpart}"), &[])
            .await?;
        Ok(payload.messages)
    }

    pub async fn send(
        &self,
        recipient: &user::Id,
        content: &str,
        attachments: &[String],
    ) -> super::Result<Message> {
        if content.trim().is_empty() {
            return Err(super::Error::EmptyContent);
        }
        api::validate_urls(attachments)?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            recipient_id: &'a user::Id,
            content: &'a str,
            attachments: &'a [String],
        }

        let payload: MessagePayload = self
            .client
            .post(
                "/api/messages",
                &Body {
                    recipient_id: recipient,
                    content,
                    attachments,
                },
            )
            .await?;
        Ok(payload.data)
    }

    pub async fn mark_read(&self, id: &Id) -> super::Result<Message> {
        let payload: MessagePayload = self
            .client
            .patch(&format!("/api/messages/{id}/read"))
            .await?;
        Ok(payload.data)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.client.delete(&format!("/api/messages/{id}")).await?)
    }

    pub async fn add_attachments(&self, id: &Id, attachments: &[String]) -> super::Result<Message> {
        api::validate_urls(attachments)?;

        #[derive(Serialize)]
        struct Body<'a> {
            attachments: &'a [String],
        }

        let payload: MessagePayload = self
            .client
            .post(
                &format!("/api/messages/{id}/attachments"),
                &Body { attachments },
            )
            .await?;
        Ok(payload.data)
    }
}
