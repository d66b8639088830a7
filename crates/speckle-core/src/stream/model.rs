//! Stream summary domain model.

use serde::{Deserialize, Deserializer, Serialize};

/// Lean projection of a stream as returned by the listing endpoint.
///
/// Only `stream_id` carries meaning for the node; the remaining fields are
/// display data passed through untouched. Unknown wire fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSummary {
    pub stream_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Treats an explicit `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StreamSummary {
    /// Creates a summary with only an id, leaving display fields empty.
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            name: None,
            description: None,
            tags: Vec::new(),
            private: None,
            updated_at: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label used when presenting the stream to a user.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.stream_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "streamId": "abc123",
            "name": "Tower",
            "owner": "5b1f",
            "layers": [],
            "tags": ["facade"]
        }"#;
        let stream: StreamSummary = serde_json::from_str(json).unwrap();
        assert_eq!(stream.stream_id, "abc123");
        assert_eq!(stream.name.as_deref(), Some("Tower"));
        assert_eq!(stream.tags, vec!["facade".to_string()]);
        assert_eq!(stream.private, None);
    }

    #[test]
    fn test_deserialize_accepts_null_tags() {
        let json = r#"{"streamId": "abc123", "tags": null, "description": null}"#;
        let stream: StreamSummary = serde_json::from_str(json).unwrap();
        assert_eq!(stream.stream_id, "abc123");
        assert!(stream.tags.is_empty());

        let stream: StreamSummary = serde_json::from_str(r#"{"streamId": "s2"}"#).unwrap();
        assert!(stream.tags.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(StreamSummary::new("s1").display_name(), "s1");
        assert_eq!(StreamSummary::new("s1").with_name("Site").display_name(), "Site");
    }
}
