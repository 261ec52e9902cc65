use std::sync::Arc;

use crate::state::{Listing, Store};
use crate::user;
use crate::user::model::User;

use super::api::TicketApi;
use super::model::{Ticket, TicketDraft, TicketFilter, TicketStatus};
use super::{Id, policy};

#[derive(Clone, Default)]
pub struct TicketState {
    pub listing: Listing<Ticket>,
    pub page: u32,
    pub filter: TicketFilter,
    pub selected: Option<Ticket>,
}

#[derive(Clone)]
pub struct TicketService {
    api: TicketApi,
    store: Arc<Store<TicketState>>,
}

impl TicketService {
    pub fn new(api: TicketApi) -> Self {
        Self {
            api,
            store: Arc::new(Store::default()),
        }
    }

    pub fn state(&self) -> TicketState {
        self.store.get()
    }

    pub fn selectable_statuses(&self, id: &Id, caller: &User) -> &'static [TicketStatus] {
        let ticket = self.store.read(|state| find(state, id));
        if policy::can_change_status(ticket.as_ref(), Some(caller)) {
            &TicketStatus::ALL
        } else {
            &[]
        }
    }
}

impl TicketService {
    pub async fn load_page(&self, page: u32, filter: TicketFilter) -> super::Result<Listing<Ticket>> {
        let observed = self.store.version();
        let listing = self.api.find_all(page, &filter).await?;

        let applied = self.store.reconcile(observed, |state| {
            state.listing = listing.clone();
            state.page = page;
            state.filter = filter;
        });
        if applied.is_none() {
            return Ok(self.store.read(|state| state.listing.clone()));
        }
        Ok(listing)
    }

    pub async fn load_mine(&self, page: u32) -> super::Result<Listing<Ticket>> {
        let listing = self.api.find_mine(page).await?;
        self.replace_listing(page, listing.clone());
        Ok(listing)
    }

    pub async fn load_assigned(&self, page: u32) -> super::Result<Listing<Ticket>> {
        let listing = self.api.find_assigned(page).await?;
        self.replace_listing(page, listing.clone());
        Ok(listing)
    }

    pub async fn open(&self, id: &Id) -> super::Result<Ticket> {
        let ticket = self.api.find_one(id).await?;
        self.store.update(|state| state.selected = Some(ticket.clone()));
        Ok(ticket)
    }

    pub async fn create(&self, draft: &TicketDraft) -> super::Result<Ticket> {
        let created = self.api.create(draft).await?;
        self.merge(created.clone());
        Ok(created)
    }

    pub async fn delete(&self, caller: &User, id: &Id) -> super::Result<()> {
        let known = self.store.read(|state| find(state, id));
        if known.is_some() && !policy::can_delete(known.as_ref(), Some(caller)) {
            return Err(super::Error::Forbidden);
        }
        self.api.delete(id).await?;

        self.store.update(|state| {
            state.listing.remove(|t| t.id == *id);
            if state.selected.as_ref().is_some_and(|t| t.id == *id) {
                state.selected = None;
            }
        });
        Ok(())
    }

    /// Appends to the thread; the server returns the whole ticket with the
    /// new entry (and any system messages it generated) included.
    pub async fn add_message(
        &self,
        id: &Id,
        content: &str,
        attachments: &[String],
    ) -> super::Result<Ticket> {
        let updated = self.api.add_message(id, content, attachments).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn change_status(
        &self,
        caller: &User,
        id: &Id,
        status: TicketStatus,
    ) -> super::Result<Ticket> {
        let known = self.store.read(|state| find(state, id));
        if known.is_some() && !policy::can_change_status(known.as_ref(), Some(caller)) {
            return Err(super::Error::Forbidden);
        }
        let updated = self.api.change_status(id, status).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn assign(&self, caller: &User, id: &Id, staff: &user::Id) -> super::Result<Ticket> {
        if !policy::can_assign(Some(caller)) {
            return Err(super::Error::Forbidden);
        }
        let updated = self.api.assign(id, staff).await?;
        self.merge(updated.clone());
        Ok(updated)
    }
}

impl TicketService {
    fn replace_listing(&self, page: u32, listing: Listing<Ticket>) {
        self.store.update(|state| {
            state.listing = listing;
            state.page = page;
        });
    }

    fn merge(&self, ticket: Ticket) {
        self.store.update(|state| {
            if state.selected.as_ref().is_some_and(|t| t.id == ticket.id) {
                state.selected = Some(ticket.clone());
            }
            let id = ticket.id.clone();
            state.listing.upsert(ticket, |t| t.id == id);
        });
    }
}

fn find(state: &TicketState, id: &Id) -> Option<Ticket> {
    state
        .selected
        .as_ref()
        .filter(|t| t.id == *id)
        .or_else(|| state.listing.items.iter().find(|t| t.id == *id))
        .cloned()
}
