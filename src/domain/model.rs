use crate::utils::error::{CrmError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_range, Validate,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    /// The four open stages, in board/pipeline display order.
    pub const OPEN_STAGES: [DealStage; 4] = [
        DealStage::Lead,
        DealStage::Qualified,
        DealStage::Proposal,
        DealStage::Negotiation,
    ];

    pub fn is_open(&self) -> bool {
        !matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Lead => "lead",
            DealStage::Qualified => "qualified",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::ClosedWon => "closed-won",
            DealStage::ClosedLost => "closed-lost",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::Qualified => "Qualified",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Closed Won",
            DealStage::ClosedLost => "Closed Lost",
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStage {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lead" => Ok(DealStage::Lead),
            "qualified" => Ok(DealStage::Qualified),
            "proposal" => Ok(DealStage::Proposal),
            "negotiation" => Ok(DealStage::Negotiation),
            "closed-won" => Ok(DealStage::ClosedWon),
            "closed-lost" => Ok(DealStage::ClosedLost),
            other => Err(CrmError::Validation {
                field: "stage".to_string(),
                value: other.to_string(),
                reason: "Unknown pipeline stage".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Call => "call",
            ActivityType::Email => "email",
            ActivityType::Meeting => "meeting",
            ActivityType::Note => "note",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub tags: Vec<String>,
}

impl Validate for ContactDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("email", &self.email)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: String,
    pub probability: u8,
    pub expected_close: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: String,
    pub probability: u8,
    pub expected_close: Option<NaiveDate>,
}

impl Validate for DealDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("title", &self.title)?;
        validate_non_empty_string("contact_id", &self.contact_id)?;
        validate_non_negative("value", self.value)?;
        validate_range("probability", self.probability, 0, 100)?;
        Ok(())
    }
}

impl From<&Deal> for DealDraft {
    fn from(deal: &Deal) -> Self {
        DealDraft {
            title: deal.title.clone(),
            value: deal.value,
            stage: deal.stage,
            contact_id: deal.contact_id.clone(),
            probability: deal.probability,
            expected_close: deal.expected_close,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityType,
    pub subject: String,
    pub notes: String,
    pub date: DateTime<Utc>,
    pub contact_id: String,
    pub deal_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub kind: ActivityType,
    pub subject: String,
    pub notes: String,
    pub date: DateTime<Utc>,
    pub contact_id: String,
    pub deal_id: Option<String>,
}

impl Validate for ActivityDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("subject", &self.subject)?;
        validate_non_empty_string("contact_id", &self.contact_id)?;
        Ok(())
    }
}
