//! Channel-management wire types.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Page size used when walking `/LiveTv/Manage/Channels`.
pub const PAGE_SIZE: usize = 30;

/// Channel id → display number (absent when the server reports none).
pub type NumberMap = HashMap<String, Option<String>>;

/// A channel as seen by the management endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManagementRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ManagementId")]
    pub management_id: String,
    /// Position the server currently assigns, 0-based.
    #[serde(rename = "SortIndexNumber", default)]
    pub sort_index_number: Option<usize>,
    /// Display number, filled in from the number map before sorting.
    #[serde(skip)]
    pub number: Option<String>,
}

impl ManagementRecord {
    pub fn new(id: impl Into<String>, management_id: impl Into<String>, sort_index: usize) -> Self {
        Self {
            id: id.into(),
            management_id: management_id.into(),
            sort_index_number: Some(sort_index),
            number: None,
        }
    }

    /// Fill in `number` from the map; ids missing from the map get `None`.
    pub fn annotate(&mut self, numbers: &NumberMap) {
        self.number = numbers.get(&self.id).cloned().flatten();
    }
}

/// A channel as listed by `/LiveTv/Channels`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfo {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Number", default, deserialize_with = "number_text")]
    pub number: Option<String>,
}

/// `{ "Items": [...] }` envelope shared by the list endpoints. A body
/// without `Items` does not decode.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse<T> {
    #[serde(rename = "Items")]
    pub items: Vec<T>,
}

/// Entry of `/ScheduledTasks`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledTask {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// One corrective write against the SortIndex endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexWrite {
    pub channel_id: String,
    pub management_id: String,
    pub new_index: usize,
}

/// Accept `"7.1"`, `7.1` or `null` for a channel number.
fn number_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
