use crate::domain::model::{Activity, ActivityType};
use chrono::NaiveDate;

/// Filter state of the activities page. `None` means the predicate is
/// inactive. The date range only applies when both bounds are set; a
/// lone bound filters nothing.
#[derive(Debug, Clone, Default)]
pub struct TimelineFilter {
    pub kind: Option<ActivityType>,
    pub contact_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TimelineFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        if let Some(kind) = self.kind {
            if activity.kind != kind {
                return false;
            }
        }
        if let Some(contact_id) = &self.contact_id {
            if &activity.contact_id != contact_id {
                return false;
            }
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let date = activity.date.date_naive();
            if date < from || date > to {
                return false;
            }
        }
        true
    }
}

/// Intersection of all active predicates, newest first.
pub fn filter_timeline(activities: &[Activity], filter: &TimelineFilter) -> Vec<Activity> {
    let mut matched: Vec<Activity> = activities
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn activity(id: &str, kind: ActivityType, contact_id: &str, date: DateTime<Utc>) -> Activity {
        Activity {
            id: id.to_string(),
            kind,
            subject: format!("Activity {}", id),
            notes: String::new(),
            date,
            contact_id: contact_id.to_string(),
            deal_id: None,
            created_at: date,
        }
    }

    fn sample() -> Vec<Activity> {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        vec![
            activity("1", ActivityType::Call, "c1", base),
            activity("2", ActivityType::Email, "c1", base + Duration::days(1)),
            activity("3", ActivityType::Call, "c2", base + Duration::days(2)),
            activity("4", ActivityType::Meeting, "c2", base + Duration::days(3)),
            activity("5", ActivityType::Call, "c1", base + Duration::days(10)),
        ]
    }

    #[test]
    fn test_no_filter_returns_all_sorted_descending() {
        let result = filter_timeline(&sample(), &TimelineFilter::default());
        assert_eq!(result.len(), 5);
        let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_filters_intersect() {
        let activities = sample();
        let both = filter_timeline(
            &activities,
            &TimelineFilter {
                kind: Some(ActivityType::Call),
                contact_id: Some("c1".to_string()),
                ..TimelineFilter::default()
            },
        );

        let by_kind = filter_timeline(
            &activities,
            &TimelineFilter {
                kind: Some(ActivityType::Call),
                ..TimelineFilter::default()
            },
        );
        let by_contact = filter_timeline(
            &activities,
            &TimelineFilter {
                contact_id: Some("c1".to_string()),
                ..TimelineFilter::default()
            },
        );

        let intersect: Vec<&Activity> = by_kind
            .iter()
            .filter(|a| by_contact.iter().any(|b| b.id == a.id))
            .collect();
        assert_eq!(both.len(), intersect.len());
        for (a, b) in both.iter().zip(intersect) {
            assert_eq!(a.id, b.id);
        }
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_half_open_date_range_filters_nothing() {
        let activities = sample();
        let from_only = filter_timeline(
            &activities,
            &TimelineFilter {
                from: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
                ..TimelineFilter::default()
            },
        );
        assert_eq!(from_only.len(), activities.len());

        let to_only = filter_timeline(
            &activities,
            &TimelineFilter {
                to: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
                ..TimelineFilter::default()
            },
        );
        assert_eq!(to_only.len(), activities.len());
    }

    #[test]
    fn test_full_date_range_is_inclusive() {
        let result = filter_timeline(
            &sample(),
            &TimelineFilter {
                from: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
                to: Some(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()),
                ..TimelineFilter::default()
            },
        );
        let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }
}
