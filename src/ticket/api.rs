use serde::{Deserialize, Serialize};

use crate::api::{self, Client};
use crate::state::Listing;
use crate::user;

use super::Id;
use super::model::{Ticket, TicketDraft, TicketFilter, TicketStatus};

#[derive(Clone)]
pub struct TicketApi {
    client: Client,
}

#[derive(Deserialize)]
struct TicketPayload {
    ticket: Ticket,
}

impl TicketApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn find_all(&self, page: u32, filter: &TicketFilter) -> super::Result<Listing<Ticket>> {
        Ok(self
            .client
            .get("/api/tickets", &filter.to_query(page))
            .await?)
    }

    /// Tickets created by the logged-in user.
    pub async fn find_mine(&self, page: u32) -> super::Result<Listing<Ticket>> {
        let query = [
            ("page", page.to_string()),
            ("limit", super::PAGE_SIZE.to_string()),
        ];
        Ok(self.client.get("/api/tickets/user/tickets", &query).await?)
    }

    /// Tickets assigned to the logged-in staff member.
    pub async fn find_assigned(&self, page: u32) -> super::Result<Listing<Ticket>> {
        let query = [
            ("page", page.to_string()),
            ("limit", super::PAGE_SIZE.to_string()),
        ];
        Ok(self
            .client
            .get("/api/tickets/staff/assigned", &query)
            .await?)
    }

    pub async fn find_one(&self, id: &Id) -> super::Result<Ticket> {
        let payload: TicketPayload = self.client.get(&format!("/api/tickets/{id}"), &[]).await?;
        Ok(payload.ticket)
    }

    pub async fn create(&self, draft: &TicketDraft) -> super::Result<Ticket> {
        let payload: TicketPayload = self.client.post("/api/tickets", draft).await?;
        Ok(payload.ticket)
    }

    pub async fn delete(&self, id: &Id) -> super::Result<()> {
        Ok(self.client.delete(&format!("/api/tickets/{id}")).await?)
    }

    pub async fn add_message(
        &self,
        id: &Id,
        content: &str,
        attachments: &[String],
    ) -> super::Result<Ticket> {
        if content.trim().is_empty() {
            return Err(super::Error::EmptyMessage);
        }
        api::validate_urls(attachments)?;

        #[derive(Serialize)]
        struct Body<'a> {
            content: &'a str,
            attachments: &'a [String],
        }

        let payload: TicketPayload = self
            .client
            .post(
                &format!("/api/tickets/{id}/messages"),
                &Body {
                    content,
                    attachments,
                },
            )
            .await?;
        Ok(payload.ticket)
    }

    pub async fn change_status(&self, id: &Id, status: TicketStatus) -> super::Result<Ticket> {
        #[derive(Serialize)]
        struct Body {
            status: TicketStatus,
        }

        let payload: TicketPayload = self
            .client
            .put(&format!("/api/tickets/{id}/status"), &Body { status })
            .await?;
        Ok(payload.ticket)
    }

    pub async fn assign(&self, id: &Id, staff: &user::Id) -> super::Result<Ticket> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            assigned_to: &'a user::Id,
        }

        let payload: TicketPayload = self
            .client
            .put(
                &format!("/api/tickets/{id}/assign"),
                &Body { assigned_to: staff },
            )
            .await?;
        Ok(payload.ticket)
    }
}
