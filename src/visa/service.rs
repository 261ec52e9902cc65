use std::sync::Arc;

use crate::state::{Listing, Store};
use crate::user::model::User;

use super::api::VisaApi;
use super::model::{VisaApplication, VisaDraft, VisaFilter, VisaStatus};
use super::{Id, policy};

#[derive(Clone, Default)]
pub struct VisaState {
    pub listing: Listing<VisaApplication>,
    pub page: u32,
    pub filter: VisaFilter,
    pub selected: Option<VisaApplication>,
}

#[derive(Clone)]
pub struct VisaService {
    api: VisaApi,
    store: Arc<Store<VisaState>>,
}

impl VisaService {
    pub fn new(api: VisaApi) -> Self {
        Self {
            api,
            store: Arc::new(Store::default()),
        }
    }

    pub fn state(&self) -> VisaState {
        self.store.get()
    }

    /// Statuses come from the visa enumeration only; staff set them through
    /// the regular update endpoint.
    pub fn selectable_statuses(&self, id: &Id, caller: &User) -> &'static [VisaStatus] {
        let application = self.store.read(|state| find(state, id));
        if policy::can_edit(application.as_ref(), Some(caller)) && caller.staff() {
            &VisaStatus::ALL
        } else {
            &[]
        }
    }
}

impl VisaService {
    pub async fn load_page(
        &self,
        page: u32,
        filter: VisaFilter,
    ) -> super::Result<Listing<VisaApplication>> {
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

    pub async fn open(&self, id: &Id) -> super::Result<VisaApplication> {
        let application = self.api.find_one(id).await?;
        self.store
            .update(|state| state.selected = Some(application.clone()));
        Ok(application)
    }

    pub async fn create(&self, draft: &VisaDraft) -> super::Result<VisaApplication> {
        let created = self.api.create(draft).await?;
        self.merge(created.clone());
        Ok(created)
    }

    pub async fn update(
        &self,
        caller: &User,
        id: &Id,
        draft: &VisaDraft,
    ) -> super::Result<VisaApplication> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.update(id, draft).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: &Id) -> super::Result<()> {
        self.authorize(id, caller, policy::can_delete)?;
        self.api.delete(id).await?;

        self.store.update(|state| {
            state.listing.remove(|a| a.id == *id);
            if state.selected.as_ref().is_some_and(|a| a.id == *id) {
                state.selected = None;
            }
        });
        Ok(())
    }

    pub async fn add_documents(
        &self,
        caller: &User,
        id: &Id,
        documents: &[String],
    ) -> super::Result<VisaApplication> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.add_documents(id, documents).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete_document(
        &self,
        caller: &User,
        id: &Id,
        index: usize,
    ) -> super::Result<VisaApplication> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.delete_document(id, index).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn upload_images(
        &self,
        caller: &User,
        id: &Id,
        images: Vec<(String, Vec<u8>)>,
    ) -> super::Result<VisaApplication> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.upload_images(id, images).await?;
        self.merge(updated.clone());
        Ok(updated)
    }
}

impl VisaService {
    fn authorize(
        &self,
        id: &Id,
        caller: &User,
        rule: fn(Option<&VisaApplication>, Option<&User>) -> bool,
    ) -> super::Result<()> {
        match self.store.read(|state| find(state, id)) {
            // unseen entity: let the server decide
            None => Ok(()),
            Some(application) if rule(Some(&application), Some(caller)) => Ok(()),
            Some(_) => Err(super::Error::Forbidden),
        }
    }

    fn merge(&self, application: VisaApplication) {
        self.store.update(|state| {
            if state
                .selected
                .as_ref()
                .is_some_and(|a| a.id == application.id)
            {
                state.selected = Some(application.clone());
            }
            let id = application.id.clone();
            state.listing.upsert(application, |a| a.id == id);
        });
    }
}

fn find(state: &VisaState, id: &Id) -> Option<VisaApplication> {
    state
        .selected
        .as_ref()
        .filter(|a| a.id == *id)
        .or_else(|| state.listing.items.iter().find(|a| a.id == *id))
        .cloned()
}
