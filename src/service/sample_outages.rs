use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::models::outage::{AffectedArea, Outage, OutageStatus, OutageType};

// Shown when the backend cannot be reached so the calendar is never blank.
pub fn sample_outages(now: DateTime<Utc>) -> Vec<Arc<Outage>> {
    vec![
        sample(
            "sample-1",
            OutageType::Electricity,
            OutageStatus::Ongoing,
            "Downtown",
            now - Duration::hours(1),
            Some(now + Duration::hours(3)),
        ),
        sample(
            "sample-2",
            OutageType::Water,
            OutageStatus::Scheduled,
            "Riverside",
            now + Duration::days(1),
            Some(now + Duration::days(1) + Duration::hours(4)),
        ),
        sample(
            "sample-3",
            OutageType::Gas,
            OutageStatus::Completed,
            "Hillcrest",
            now - Duration::days(2),
            Some(now - Duration::days(2) + Duration::hours(2)),
        ),
    ]
}

fn sample(
    id: &str,
    outage_type: OutageType,
    status: OutageStatus,
    area: &str,
    start_time: DateTime<Utc>,
    estimated_end_time: Option<DateTime<Utc>>,
) -> Arc<Outage> {
    Arc::new(Outage {
        id: id.to_string(),
        outage_type,
        status,
        start_time,
        estimated_end_time,
        actual_end_time: None,
        affected_area: Some(AffectedArea {
            name: Some(area.to_string()),
            city: None,
        }),
        description: Some("Sample data shown while live outages are unavailable.".to_string()),
        reason: None,
    })
}
