use crate::domain::ports::{Entity, EntityPort};
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Port over a plain in-memory row list. Same contract as the remote
/// collection, used by tests and offline demo runs. Ids are assigned
/// from a monotonic counter, mirroring the server side.
pub struct InMemoryCollection<E: Entity> {
    rows: Mutex<Vec<E>>,
    next_id: AtomicU64,
}

impl<E: Entity> InMemoryCollection<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_rows(rows: Vec<E>) -> Self {
        let next = rows
            .iter()
            .filter_map(|row| row.id().parse::<u64>().ok())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
        Self {
            rows: Mutex::new(rows),
            next_id: AtomicU64::new(next),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("collection mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Entity> Default for InMemoryCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityPort<E> for InMemoryCollection<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        Ok(self.rows.lock().expect("collection mutex poisoned").clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<E> {
        self.rows
            .lock()
            .expect("collection mutex poisoned")
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| CrmError::not_found(E::KIND, id))
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        draft.validate()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let record = E::materialize(draft, id, Utc::now());
        let mut rows = self.rows.lock().expect("collection mutex poisoned");
        rows.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, draft: E::Draft) -> Result<E> {
        draft.validate()?;
        let mut rows = self.rows.lock().expect("collection mutex poisoned");
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| CrmError::not_found(E::KIND, id))?;
        let updated = slot.revise(draft);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.lock().expect("collection mutex poisoned");
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(CrmError::not_found(E::KIND, id));
        }
        Ok(true)
    }
}
