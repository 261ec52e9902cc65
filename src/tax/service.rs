use std::sync::Arc;

use crate::state::{Listing, Store};
use crate::user::model::User;

use super::api::TaxApi;
use super::model::{TaxCase, TaxCaseDraft, TaxFilter, TaxStatus};
use super::{Id, policy};

#[derive(Clone, Default)]
pub struct TaxState {
    pub listing: Listing<TaxCase>,
    pub page: u32,
    pub filter: TaxFilter,
    pub selected: Option<TaxCase>,
}

#[derive(Clone)]
pub struct TaxService {
    api: TaxApi,
    store: Arc<Store<TaxState>>,
}

impl TaxService {
    pub fn new(api: TaxApi) -> Self {
        Self {
            api,
            store: Arc::new(Store::default()),
        }
    }

    pub fn state(&self) -> TaxState {
        self.store.get()
    }

    /// The status picker offers the whole enumeration to anyone passing
    /// `can_change_status`; legal-transition filtering is the server's call.
    pub fn selectable_statuses(&self, id: &Id, caller: &User) -> &'static [TaxStatus] {
        let case = self.store.read(|state| find(state, id));
        if policy::can_change_status(case.as_ref(), Some(caller)) {
            &TaxStatus::ALL
        } else {
            &[]
        }
    }
}

impl TaxService {
    pub async fn load_page(&self, page: u32, filter: TaxFilter) -> super::Result<Listing<TaxCase>> {
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

    pub async fn open(&self, id: &Id) -> super::Result<TaxCase> {
        let case = self.api.find_one(id).await?;
        self.store.update(|state| state.selected = Some(case.clone()));
        Ok(case)
    }

    pub async fn create(&self, draft: &TaxCaseDraft) -> super::Result<TaxCase> {
        let created = self.api.create(draft).await?;
        self.merge(created.clone());
        Ok(created)
    }

    pub async fn update(&self, caller: &User, id: &Id, draft: &TaxCaseDraft) -> super::Result<TaxCase> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.update(id, draft).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: &Id) -> super::Result<()> {
        self.authorize(id, caller, policy::can_delete)?;
        self.api.delete(id).await?;

        self.store.update(|state| {
            state.listing.remove(|c| c.id == *id);
            if state.selected.as_ref().is_some_and(|c| c.id == *id) {
                state.selected = None;
            }
        });
        Ok(())
    }

    /// Replaces local state with the server's returned case; the server is
    /// the source of truth after a status change, not a locally computed
    /// next state.
    pub async fn change_status(
        &self,
        caller: &User,
        id: &Id,
        status: TaxStatus,
    ) -> super::Result<TaxCase> {
        self.authorize(id, caller, policy::can_change_status)?;
        let updated = self.api.change_status(id, status).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn add_documents(
        &self,
        caller: &User,
        id: &Id,
        documents: &[String],
    ) -> super::Result<TaxCase> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.add_documents(id, documents).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete_document(&self, caller: &User, id: &Id, index: usize) -> super::Result<TaxCase> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.delete_document(id, index).await?;
        self.merge(updated.clone());
        Ok(updated)
    }
}

impl TaxService {
    fn authorize(
        &self,
        id: &Id,
        caller: &User,
        rule: fn(Option<&TaxCase>, Option<&User>) -> bool,
    ) -> super::Result<()> {
        match self.store.read(|state| find(state, id)) {
            // unseen entity: let the server decide
            None => Ok(()),
            Some(case) if rule(Some(&case), Some(caller)) => Ok(()),
            Some(_) => Err(super::Error::Forbidden),
        }
    }

    fn merge(&self, case: TaxCase) {
        self.store.update(|state| {
            if state.selected.as_ref().is_some_and(|c| c.id == case.id) {
                state.selected = Some(case.clone());
            }
            let id = case.id.clone();
            state.listing.upsert(case, |c| c.id == id);
        });
    }
}

fn find(state: &TaxState, id: &Id) -> Option<TaxCase> {
    state
        .selected
        .as_ref()
        .filter(|c| c.id == *id)
        .or_else(|| state.listing.items.iter().find(|c| c.id == *id))
        .cloned()
}
