use std::sync::Mutex;

use serde::Deserialize;

/// Paginated list envelope returned by every list endpoint. Pages are
/// 1-indexed; the backend names the collection `items` or `data` depending on
/// the module.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    #[serde(alias = "data")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}

impl<T> Listing<T> {
    /// Replaces the item matching `same` with the server-returned entity, or
    /// prepends it when the list has not seen it yet.
    pub fn upsert(&mut self, entity: T, same: impl Fn(&T) -> bool) {
        if let Some(slot) = self.items.iter_mut().find(|item| same(item)) {
            *slot = entity;
        } else {
            self.items.insert(0, entity);
            self.total += 1;
        }
    }

    pub fn remove(&mut self, same: impl Fn(&T) -> bool) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !same(item));
        let removed = self.items.len() < before;
        if removed {
            self.total = self.total.saturating_sub(1);
        }
        removed
    }
}

/// Local component state guarded by a monotonic version counter.
///
/// Mutation responses go through [`Store::update`], which bumps the version.
/// Background polls capture the version before fetching and hand it back to
/// [`Store::reconcile`]; a snapshot observed before a mutation landed is
/// discarded instead of clobbering the fresher state.
pub struct Store<T> {
    inner: Mutex<Versioned<T>>,
}

struct Versioned<T> {
    version: u64,
    value: T,
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Versioned { version: 0, value }),
        }
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn update<R>(&self, apply: impl FnOnce(&mut T) -> R) -> R {
        let mut inner = self.lock();
        inner.version += 1;
        apply(&mut inner.value)
    }

    pub fn reconcile<R>(&self, observed: u64, apply: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut inner = self.lock();
        if inner.version != observed {
            return None;
        }
        inner.version += 1;
        Some(apply(&mut inner.value))
    }

    pub fn read<R>(&self, view: impl FnOnce(&T) -> R) -> R {
        view(&self.lock().value)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Versioned<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Store<T> {
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }
}
