use crate::domain::model::{
    Activity, ActivityDraft, ActivityType, Contact, ContactDraft, Deal, DealDraft, DealStage,
};
use crate::domain::ports::{Entity, EntityPort};
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Wire mapping for one entity. The backend's field names diverge from
/// the domain (contacts arrive Apper-cased with comma-joined tags,
/// deals and activities arrive camelCased); this is the single place
/// where that divergence is resolved.
pub trait RemoteEntity: Entity {
    type Dto: DeserializeOwned + Send;
    type DraftDto: Serialize + Send + Sync;

    fn from_dto(dto: Self::Dto) -> Self;
    fn draft_to_dto(draft: &Self::Draft) -> Self::DraftDto;
}

/// reqwest-backed port over one remote collection:
/// `GET /{collection}`, `POST /{collection}`,
/// `GET|PUT|DELETE /{collection}/{id}`. A 404 on an id route maps to
/// `NotFound`; every other failure surfaces as `Transport`.
pub struct RemoteCollection<E> {
    client: Client,
    base: Url,
    _entity: PhantomData<E>,
}

impl<E: RemoteEntity> RemoteCollection<E> {
    pub fn new(client: Client, base: Url) -> Self {
        Self {
            client,
            base,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs are always a valid base
        url.path_segments_mut()
            .expect("base URL must be http(s)")
            .pop_if_empty()
            .push(E::KIND);
        url
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.collection_url();
        url.path_segments_mut()
            .expect("base URL must be http(s)")
            .push(id);
        url
    }

    fn guard_record(response: Response, id: &str) -> Result<Response> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CrmError::not_found(E::KIND, id));
        }
        Ok(response.error_for_status()?)
    }
}

#[async_trait]
impl<E: RemoteEntity> EntityPort<E> for RemoteCollection<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let dtos: Vec<E::Dto> = response.json().await?;
        Ok(dtos.into_iter().map(E::from_dto).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<E> {
        let url = self.record_url(id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let dto: E::Dto = Self::guard_record(response, id)?.json().await?;
        Ok(E::from_dto(dto))
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        draft.validate()?;
        let url = self.collection_url();
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(&E::draft_to_dto(&draft))
            .send()
            .await?
            .error_for_status()?;
        let dto: E::Dto = response.json().await?;
        Ok(E::from_dto(dto))
    }

    async fn update(&self, id: &str, draft: E::Draft) -> Result<E> {
        draft.validate()?;
        let url = self.record_url(id);
        tracing::debug!("PUT {}", url);
        let response = self
            .client
            .put(url)
            .json(&E::draft_to_dto(&draft))
            .send()
            .await?;
        let dto: E::Dto = Self::guard_record(response, id)?.json().await?;
        Ok(E::from_dto(dto))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let url = self.record_url(id);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::guard_record(response, id)?;
        Ok(true)
    }
}

/// Comma-joined tag string to a trimmed list, dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

#[derive(Debug, Deserialize)]
pub struct ContactDto {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "Tags", default)]
    pub tags: Option<String>,
    #[serde(rename = "CreatedOn")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ContactDraftDto {
    #[serde(rename = "Name")]
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "Tags")]
    pub tags: String,
}

impl RemoteEntity for Contact {
    type Dto = ContactDto;
    type DraftDto = ContactDraftDto;

    fn from_dto(dto: ContactDto) -> Self {
        Contact {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            company: dto.company,
            tags: dto.tags.as_deref().map(split_tags).unwrap_or_default(),
            created_at: dto.created_at,
        }
    }

    fn draft_to_dto(draft: &ContactDraft) -> ContactDraftDto {
        ContactDraftDto {
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            company: draft.company.clone(),
            tags: join_tags(&draft.tags),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDto {
    pub id: String,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: String,
    pub probability: u8,
    #[serde(default)]
    pub expected_close: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDraftDto {
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: String,
    pub probability: u8,
    pub expected_close: Option<NaiveDate>,
}

impl RemoteEntity for Deal {
    type Dto = DealDto;
    type DraftDto = DealDraftDto;

    fn from_dto(dto: DealDto) -> Self {
        Deal {
            id: dto.id,
            title: dto.title,
            value: dto.value,
            stage: dto.stage,
            contact_id: dto.contact_id,
            probability: dto.probability,
            expected_close: dto.expected_close,
            created_at: dto.created_at,
        }
    }

    fn draft_to_dto(draft: &DealDraft) -> DealDraftDto {
        DealDraftDto {
            title: draft.title.clone(),
            value: draft.value,
            stage: draft.stage,
            contact_id: draft.contact_id.clone(),
            probability: draft.probability,
            expected_close: draft.expected_close,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub subject: String,
    #[serde(default)]
    pub notes: String,
    pub date: DateTime<Utc>,
    pub contact_id: String,
    #[serde(default)]
    pub deal_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraftDto {
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub subject: String,
    pub notes: String,
    pub date: DateTime<Utc>,
    pub contact_id: String,
    pub deal_id: Option<String>,
}

impl RemoteEntity for Activity {
    type Dto = ActivityDto;
    type DraftDto = ActivityDraftDto;

    fn from_dto(dto: ActivityDto) -> Self {
        Activity {
            id: dto.id,
            kind: dto.kind,
            subject: dto.subject,
            notes: dto.notes,
            date: dto.date,
            contact_id: dto.contact_id,
            deal_id: dto.deal_id,
            created_at: dto.created_at,
        }
    }

    fn draft_to_dto(draft: &ActivityDraft) -> ActivityDraftDto {
        ActivityDraftDto {
            kind: draft.kind,
            subject: draft.subject.clone(),
            notes: draft.notes.clone(),
            date: draft.date,
            contact_id: draft.contact_id.clone(),
            deal_id: draft.deal_id.clone(),
        }
    }
}
