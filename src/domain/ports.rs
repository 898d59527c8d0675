use crate::domain::model::{
    Activity, ActivityDraft, Contact, ContactDraft, Deal, DealDraft,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A record stored in a remote collection. The server owns the id and
/// creation timestamp; clients only ever submit the draft fields.
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Validate + Clone + Send + Sync + 'static;

    /// Collection name on the backing store, also used in error labels.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Build a full record from a draft plus server-assigned fields.
    fn materialize(draft: Self::Draft, id: String, created_at: DateTime<Utc>) -> Self;

    /// Apply a draft over an existing record, keeping id and created_at.
    fn revise(&self, draft: Self::Draft) -> Self;
}

/// CRUD surface of one remote entity collection. Implementations must
/// validate drafts before issuing any remote call, return the canonical
/// stored record from create/update, and fail with `NotFound` when an
/// id does not resolve.
#[async_trait]
pub trait EntityPort<E: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<E>>;
    async fn get_by_id(&self, id: &str) -> Result<E>;
    async fn create(&self, draft: E::Draft) -> Result<E>;
    async fn update(&self, id: &str, draft: E::Draft) -> Result<E>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

impl Entity for Contact {
    type Draft = ContactDraft;

    const KIND: &'static str = "contact";

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(draft: ContactDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Contact {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            tags: draft.tags,
            created_at,
        }
    }

    fn revise(&self, draft: ContactDraft) -> Self {
        Contact {
            id: self.id.clone(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            tags: draft.tags,
            created_at: self.created_at,
        }
    }
}

impl Entity for Deal {
    type Draft = DealDraft;

    const KIND: &'static str = "deal";

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(draft: DealDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Deal {
            id,
            title: draft.title,
            value: draft.value,
            stage: draft.stage,
            contact_id: draft.contact_id,
            probability: draft.probability,
            expected_close: draft.expected_close,
            created_at,
        }
    }

    fn revise(&self, draft: DealDraft) -> Self {
        Deal {
            id: self.id.clone(),
            title: draft.title,
            value: draft.value,
            stage: draft.stage,
            contact_id: draft.contact_id,
            probability: draft.probability,
            expected_close: draft.expected_close,
            created_at: self.created_at,
        }
    }
}

impl Entity for Activity {
    type Draft = ActivityDraft;

    const KIND: &'static str = "activity";

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(draft: ActivityDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Activity {
            id,
            kind: draft.kind,
            subject: draft.subject,
            notes: draft.notes,
            date: draft.date,
            contact_id: draft.contact_id,
            deal_id: draft.deal_id,
            created_at,
        }
    }

    fn revise(&self, draft: ActivityDraft) -> Self {
        Activity {
            id: self.id.clone(),
            kind: draft.kind,
            subject: draft.subject,
            notes: draft.notes,
            date: draft.date,
            contact_id: draft.contact_id,
            deal_id: draft.deal_id,
            created_at: self.created_at,
        }
    }
}
