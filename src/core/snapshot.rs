use crate::domain::model::{Activity, Contact, Deal};
use crate::domain::ports::{Entity, EntityPort};
use crate::utils::error::Result;

/// UI-session-scoped view of the three collections. Never persisted;
/// mutated only with records the ports have already confirmed.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub activities: Vec<Activity>,
}

/// Fetch all three collections in parallel and join. If any fetch
/// fails the whole load fails; no partial snapshot is produced.
pub async fn load_snapshot(
    contacts: &dyn EntityPort<Contact>,
    deals: &dyn EntityPort<Deal>,
    activities: &dyn EntityPort<Activity>,
) -> Result<Snapshot> {
    let (contacts, deals, activities) = tokio::try_join!(
        contacts.get_all(),
        deals.get_all(),
        activities.get_all(),
    )?;

    tracing::debug!(
        "Snapshot loaded: {} contacts, {} deals, {} activities",
        contacts.len(),
        deals.len(),
        activities.len()
    );

    Ok(Snapshot {
        contacts,
        deals,
        activities,
    })
}

/// Prepend a server-returned record, newest first.
pub fn adopt_created<E: Entity>(rows: &mut Vec<E>, record: E) {
    rows.insert(0, record);
}

/// Replace the matching row with the server-returned record. Returns
/// false when no row matches, leaving the list untouched.
pub fn adopt_updated<E: Entity>(rows: &mut Vec<E>, record: E) -> bool {
    match rows.iter_mut().find(|row| row.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Drop a row after the port confirmed the delete.
pub fn remove_deleted<E: Entity>(rows: &mut Vec<E>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    rows.len() != before
}
