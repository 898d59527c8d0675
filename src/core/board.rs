use crate::core::snapshot::adopt_updated;
use crate::domain::model::{Deal, DealDraft, DealStage};
use crate::domain::ports::EntityPort;
use crate::utils::error::{CrmError, Result};

/// Outcome of a stage-change request.
#[derive(Debug, Clone)]
pub enum StageChange {
    /// Target stage equals the current stage; no port call was issued.
    Unchanged,
    /// The port accepted the update; carries the canonical record.
    Moved(Deal),
}

/// Kanban board over the deal snapshot. Holds at most one dragged-deal
/// reference; the reference clears only after the in-flight update
/// settles, so a second drag cannot start while one is pending.
pub struct DealBoard<P: EntityPort<Deal>> {
    port: P,
    deals: Vec<Deal>,
    dragged: Option<String>,
}

impl<P: EntityPort<Deal>> DealBoard<P> {
    pub fn new(port: P, deals: Vec<Deal>) -> Self {
        Self {
            port,
            deals,
            dragged: None,
        }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn deals_in_stage(&self, stage: DealStage) -> Vec<&Deal> {
        self.deals.iter().filter(|d| d.stage == stage).collect()
    }

    pub fn stage_value(&self, stage: DealStage) -> f64 {
        self.deals
            .iter()
            .filter(|d| d.stage == stage)
            .map(|d| d.value)
            .sum()
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    /// Start a drag gesture. Refused while another transition is still
    /// in flight or when the id does not exist on the board.
    pub fn begin_drag(&mut self, deal_id: &str) -> bool {
        if self.dragged.is_some() || !self.deals.iter().any(|d| d.id == deal_id) {
            return false;
        }
        self.dragged = Some(deal_id.to_string());
        true
    }

    /// Settle the active drag gesture onto `target`. The dragged
    /// reference is cleared whether the update succeeds or fails.
    pub async fn drop_on(&mut self, target: DealStage) -> Result<StageChange> {
        let Some(deal_id) = self.dragged.clone() else {
            return Ok(StageChange::Unchanged);
        };
        let result = self.request_stage_change(&deal_id, target).await;
        self.dragged = None;
        result
    }

    /// Move one deal to `target` through the port. A request targeting
    /// the deal's current stage is a no-op with no port call. On
    /// success the local row is replaced with the record the port
    /// returned; on failure the snapshot is left exactly as it was and
    /// the error bubbles to the caller.
    pub async fn request_stage_change(
        &mut self,
        deal_id: &str,
        target: DealStage,
    ) -> Result<StageChange> {
        let deal = self
            .deals
            .iter()
            .find(|d| d.id == deal_id)
            .ok_or_else(|| CrmError::not_found("deal", deal_id))?;

        if deal.stage == target {
            tracing::debug!("Deal {} already in stage {}, nothing to do", deal_id, target);
            return Ok(StageChange::Unchanged);
        }

        let mut draft = DealDraft::from(deal);
        draft.stage = target;

        let updated = self.port.update(deal_id, draft).await?;
        tracing::info!("Deal {} moved to {}", deal_id, updated.stage);

        adopt_updated(&mut self.deals, updated.clone());
        Ok(StageChange::Moved(updated))
    }
}
