use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::timestamp;

/// Utility affected by an outage. Unknown wire values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutageType {
    Electricity,
    Water,
    Gas,
    Internet,
    Other(String),
}

impl OutageType {
    pub fn as_str(&self) -> &str {
        match self {
            OutageType::Electricity => "ELECTRICITY",
            OutageType::Water => "WATER",
            OutageType::Gas => "GAS",
            OutageType::Internet => "INTERNET",
            OutageType::Other(raw) => raw,
        }
    }
}

impl From<String> for OutageType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ELECTRICITY" => OutageType::Electricity,
            "WATER" => OutageType::Water,
            "GAS" => OutageType::Gas,
            "INTERNET" => OutageType::Internet,
            _ => OutageType::Other(raw),
        }
    }
}

impl From<OutageType> for String {
    fn from(value: OutageType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OutageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutageStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
    Other(String),
}

impl OutageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OutageStatus::Scheduled => "SCHEDULED",
            OutageStatus::Ongoing => "ONGOING",
            OutageStatus::Completed => "COMPLETED",
            OutageStatus::Cancelled => "CANCELLED",
            OutageStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for OutageStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SCHEDULED" => OutageStatus::Scheduled,
            "ONGOING" => OutageStatus::Ongoing,
            "COMPLETED" => OutageStatus::Completed,
            "CANCELLED" => OutageStatus::Cancelled,
            _ => OutageStatus::Other(raw),
        }
    }
}

impl From<OutageStatus> for String {
    fn from(value: OutageStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for OutageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AffectedArea {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Outage record as served by `GET /api/public/outages/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outage {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub outage_type: OutageType,
    pub status: OutageStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub estimated_end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub actual_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected_area: Option<AffectedArea>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Outage {
    pub fn area_name(&self) -> Option<&str> {
        self.affected_area
            .as_ref()
            .and_then(|area| area.name.as_deref())
    }

    /// Estimated end wins over the actual end when both are present.
    pub fn display_end(&self) -> Option<DateTime<Utc>> {
        self.estimated_end_time.or(self.actual_end_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct OutagesResponse {
    pub data: Vec<Outage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_payload() {
        let body = r#"{
            "data": [
                {
                    "id": 17,
                    "type": "WATER",
                    "status": "ONGOING",
                    "startTime": "2025-03-01T08:00:00",
                    "estimatedEndTime": "2025-03-01T12:00:00",
                    "actualEndTime": null,
                    "affectedArea": {"name": "Downtown", "city": "Springfield"}
                },
                {
                    "id": "b-2",
                    "type": "SEWAGE",
                    "status": "POSTPONED",
                    "startTime": "2025-03-02T08:00:00Z",
                    "affectedArea": null
                }
            ]
        }"#;

        let parsed: OutagesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);

        let water = &parsed.data[0];
        assert_eq!(water.id, "17");
        assert_eq!(water.outage_type, OutageType::Water);
        assert_eq!(water.status, OutageStatus::Ongoing);
        assert_eq!(water.area_name(), Some("Downtown"));
        assert!(water.actual_end_time.is_none());

        let other = &parsed.data[1];
        assert_eq!(other.outage_type, OutageType::Other("SEWAGE".to_string()));
        assert_eq!(other.status.as_str(), "POSTPONED");
        assert_eq!(other.area_name(), None);
        assert_eq!(other.display_end(), None);
    }

    #[test]
    fn estimated_end_takes_precedence() {
        let body = r#"{
            "id": "1", "type": "GAS", "status": "COMPLETED",
            "startTime": "2025-03-01T08:00:00Z",
            "estimatedEndTime": "2025-03-01T10:00:00Z",
            "actualEndTime": "2025-03-01T11:00:00Z"
        }"#;
        let outage: Outage = serde_json::from_str(body).unwrap();
        assert_eq!(outage.display_end(), outage.estimated_end_time);
    }
}
