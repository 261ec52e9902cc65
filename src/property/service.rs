use std::sync::Arc;

use crate::state::{Listing, Store};
use crate::user::model::User;

use super::api::PropertyApi;
use super::model::{Property, PropertyDraft, PropertyFilter};
use super::{Id, policy};

#[derive(Clone, Default)]
pub struct PropertyState {
    pub listing: Listing<Property>,
    pub page: u32,
    pub filter: PropertyFilter,
    pub selected: Option<Property>,
}

/// Dispatches listing mutations and merges confirmed results back into local
/// state. Nothing is applied optimistically; a failed call leaves the state
/// exactly as it was.
#[derive(Clone)]
pub struct PropertyService {
    api: PropertyApi,
    store: Arc<Store<PropertyState>>,
}

impl PropertyService {
    pub fn new(api: PropertyApi) -> Self {
        Self {
            api,
            store: Arc::new(Store::default()),
        }
    }

    pub fn state(&self) -> PropertyState {
        self.store.get()
    }
}

impl PropertyService {
    pub async fn load_page(&self, page: u32, filter: PropertyFilter) -> super::Result<Listing<Property>> {
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

    pub async fn open(&self, id: &Id) -> super::Result<Property> {
        let property = self.api.find_one(id).await?;
        self.store.update(|state| state.selected = Some(property.clone()));
        Ok(property)
    }

    pub async fn create(&self, draft: &PropertyDraft) -> super::Result<Property> {
        let created = self.api.create(draft).await?;
        self.merge(created.clone());
        Ok(created)
    }

    pub async fn update(
        &self,
        caller: &User,
        id: &Id,
        draft: &PropertyDraft,
    ) -> super::Result<Property> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.update(id, draft).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: &Id) -> super::Result<()> {
        self.authorize(id, caller, policy::can_delete)?;
        self.api.delete(id).await?;

        self.store.update(|state| {
            state.listing.remove(|p| p.id == *id);
            if state.selected.as_ref().is_some_and(|p| p.id == *id) {
                state.selected = None;
            }
        });
        Ok(())
    }

    pub async fn upload_images(
        &self,
        caller: &User,
        id: &Id,
        images: Vec<(String, Vec<u8>)>,
    ) -> super::Result<Property> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.upload_images(id, images).await?;
        self.merge(updated.clone());
        Ok(updated)
    }

    pub async fn delete_image(&self, caller: &User, id: &Id, index: usize) -> super::Result<Property> {
        self.authorize(id, caller, policy::can_edit)?;
        let updated = self.api.delete_image(id, index).await?;
        self.merge(updated.clone());
        Ok(updated)
    }
}

impl PropertyService {
    fn authorize(
        &self,
        id: &Id,
        caller: &User,
        rule: fn(Option<&Property>, Option<&User>) -> bool,
    ) -> super::Result<()> {
        let known = self.store.read(|state| self.find(state, id));
        match known {
            // unseen entity: let the server decide
            None => Ok(()),
            Some(property) if rule(Some(&property), Some(caller)) => Ok(()),
            Some(_) => Err(super::Error::Forbidden),
        }
    }

    fn find(&self, state: &PropertyState, id: &Id) -> Option<Property> {
        state
            .selected
            .as_ref()
            .filter(|p| p.id == *id)
            .or_else(|| state.listing.items.iter().find(|p| p.id == *id))
            .cloned()
    }

    fn merge(&self, property: Property) {
        self.store.update(|state| {
            if state.selected.as_ref().is_some_and(|p| p.id == property.id) {
                state.selected = Some(property.clone());
            }
            let id = property.id.clone();
            state.listing.upsert(property, |p| p.id == id);
        });
    }
}
