use crate::core::snapshot::Snapshot;
use crate::domain::model::{Activity, Contact, Deal, DealStage};
use chrono::{DateTime, Duration, Utc};

pub const UNKNOWN_CONTACT: &str = "Unknown Contact";

/// Activities at or after `now - 7 days` count as recent. No upper
/// bound; a future-dated activity still counts.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Raw numbers only; currency and date formatting belong to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_contacts: usize,
    pub active_deals: usize,
    pub total_deal_value: f64,
    pub conversion_rate: f64,
    pub recent_activities: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageSummary {
    pub stage: DealStage,
    pub count: usize,
    pub value: f64,
}

/// One feed row: the activity plus the resolved contact display name.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub activity: Activity,
    pub contact_name: String,
}

pub fn dashboard_stats(snapshot: &Snapshot, now: DateTime<Utc>) -> DashboardStats {
    let active: Vec<&Deal> = snapshot.deals.iter().filter(|d| d.stage.is_open()).collect();
    let won = snapshot
        .deals
        .iter()
        .filter(|d| d.stage == DealStage::ClosedWon)
        .count();
    let total = snapshot.deals.len();

    let conversion_rate = if total > 0 {
        (won as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let week_ago = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent_activities = snapshot
        .activities
        .iter()
        .filter(|a| a.date >= week_ago)
        .count();

    DashboardStats {
        total_contacts: snapshot.contacts.len(),
        active_deals: active.len(),
        total_deal_value: active.iter().map(|d| d.value).sum(),
        conversion_rate,
        recent_activities,
    }
}

/// Count and value of active deals per open stage, always in the fixed
/// order lead, qualified, proposal, negotiation. Closed stages never
/// appear in the pipeline view.
pub fn pipeline_summary(deals: &[Deal]) -> Vec<StageSummary> {
    DealStage::OPEN_STAGES
        .iter()
        .map(|&stage| {
            let stage_deals: Vec<&Deal> = deals.iter().filter(|d| d.stage == stage).collect();
            StageSummary {
                stage,
                count: stage_deals.len(),
                value: stage_deals.iter().map(|d| d.value).sum(),
            }
        })
        .collect()
}

/// Newest activities first (stable on date ties), truncated to `limit`
/// and enriched with the contact display name.
pub fn recent_activity_feed(
    activities: &[Activity],
    contacts: &[Contact],
    limit: usize,
) -> Vec<FeedEntry> {
    let mut sorted: Vec<&Activity> = activities.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .into_iter()
        .take(limit)
        .map(|activity| {
            let contact_name = contacts
                .iter()
                .find(|c| c.id == activity.contact_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CONTACT.to_string());
            FeedEntry {
                activity: activity.clone(),
                contact_name,
            }
        })
        .collect()
}

/// Most recently created contacts, for the home view teaser list.
pub fn recent_contacts(contacts: &[Contact], limit: usize) -> Vec<Contact> {
    let mut sorted: Vec<&Contact> = contacts.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ActivityType;
    use chrono::TimeZone;

    fn contact(id: &str, name: &str, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: None,
            company: None,
            tags: vec![],
            created_at,
        }
    }

    fn deal(id: &str, stage: DealStage, value: f64) -> Deal {
        Deal {
            id: id.to_string(),
            title: format!("Deal {}", id),
            value,
            stage,
            contact_id: "1".to_string(),
            probability: 50,
            expected_close: None,
            created_at: Utc::now(),
        }
    }

    fn activity(id: &str, contact_id: &str, date: DateTime<Utc>) -> Activity {
        Activity {
            id: id.to_string(),
            kind: ActivityType::Call,
            subject: format!("Activity {}", id),
            notes: String::new(),
            date,
            contact_id: contact_id.to_string(),
            deal_id: None,
            created_at: date,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_dashboard_stats_scenario() {
        let snapshot = Snapshot {
            contacts: vec![],
            deals: vec![
                deal("1", DealStage::Lead, 100.0),
                deal("2", DealStage::ClosedWon, 200.0),
                deal("3", DealStage::Proposal, 50.0),
            ],
            activities: vec![],
        };
        let stats = dashboard_stats(&snapshot, now());
        assert_eq!(stats.active_deals, 2);
        assert_eq!(stats.total_deal_value, 150.0);
        assert!((stats.conversion_rate - 33.333333).abs() < 0.001);
    }

    #[test]
    fn test_conversion_rate_zero_on_empty() {
        let stats = dashboard_stats(&Snapshot::default(), now());
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(stats.conversion_rate.is_finite());
    }

    #[test]
    fn test_active_plus_closed_equals_total() {
        let deals = vec![
            deal("1", DealStage::Lead, 10.0),
            deal("2", DealStage::Negotiation, 10.0),
            deal("3", DealStage::ClosedWon, 10.0),
            deal("4", DealStage::ClosedLost, 10.0),
            deal("5", DealStage::ClosedWon, 10.0),
        ];
        let active = deals.iter().filter(|d| d.stage.is_open()).count();
        let won = deals
            .iter()
            .filter(|d| d.stage == DealStage::ClosedWon)
            .count();
        let lost = deals
            .iter()
            .filter(|d| d.stage == DealStage::ClosedLost)
            .count();
        assert_eq!(active + won + lost, deals.len());
    }

    #[test]
    fn test_closing_a_deal_removes_it_from_pipeline() {
        let mut snapshot = Snapshot {
            deals: vec![deal("1", DealStage::Lead, 100.0), deal("2", DealStage::Proposal, 50.0)],
            ..Snapshot::default()
        };
        let before = dashboard_stats(&snapshot, now());
        assert_eq!(before.active_deals, 2);
        assert_eq!(before.total_deal_value, 150.0);

        snapshot.deals[0].stage = DealStage::ClosedWon;
        let after = dashboard_stats(&snapshot, now());
        assert_eq!(after.active_deals, 1);
        assert_eq!(after.total_deal_value, 50.0);
        assert!(pipeline_summary(&snapshot.deals)
            .iter()
            .all(|s| s.stage != DealStage::ClosedWon));
    }

    #[test]
    fn test_pipeline_summary_fixed_order() {
        // input deliberately shuffled
        let deals = vec![
            deal("1", DealStage::Negotiation, 400.0),
            deal("2", DealStage::Lead, 100.0),
            deal("3", DealStage::ClosedLost, 999.0),
            deal("4", DealStage::Lead, 150.0),
            deal("5", DealStage::Proposal, 300.0),
        ];
        let summary = pipeline_summary(&deals);
        let stages: Vec<DealStage> = summary.iter().map(|s| s.stage).collect();
        assert_eq!(stages, DealStage::OPEN_STAGES.to_vec());
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].value, 250.0);
        assert_eq!(summary[1].count, 0);
        assert_eq!(summary[1].value, 0.0);
    }

    #[test]
    fn test_recent_window_boundary() {
        let now = now();
        let snapshot = Snapshot {
            activities: vec![
                activity("7d", "1", now - Duration::days(7)),
                activity("8d", "1", now - Duration::days(8)),
                activity("today", "1", now),
            ],
            ..Snapshot::default()
        };
        let stats = dashboard_stats(&snapshot, now);
        // exactly seven days old is still recent, eight is not
        assert_eq!(stats.recent_activities, 2);
    }

    #[test]
    fn test_feed_sorted_descending_with_stable_ties() {
        let now = now();
        let activities = vec![
            activity("a", "1", now - Duration::days(2)),
            activity("b", "1", now - Duration::days(1)),
            activity("c", "1", now - Duration::days(1)),
        ];
        let feed = recent_activity_feed(&activities, &[], 5);
        let ids: Vec<&str> = feed.iter().map(|e| e.activity.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_feed_limit_and_unknown_contact_fallback() {
        let now = now();
        let contacts = vec![contact("1", "Jane Cooper", now)];
        let activities = vec![
            activity("a", "1", now),
            activity("b", "404", now - Duration::days(1)),
        ];
        let feed = recent_activity_feed(&activities, &contacts, 1);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].contact_name, "Jane Cooper");

        let feed = recent_activity_feed(&activities, &contacts, 5);
        assert_eq!(feed[1].contact_name, UNKNOWN_CONTACT);
    }

    #[test]
    fn test_recent_contacts_newest_first() {
        let now = now();
        let contacts = vec![
            contact("1", "Old", now - Duration::days(30)),
            contact("2", "New", now),
            contact("3", "Mid", now - Duration::days(10)),
            contact("4", "Older", now - Duration::days(40)),
        ];
        let recent = recent_contacts(&contacts, 3);
        let names: Vec<&str> = recent.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }
}
