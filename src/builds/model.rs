//! Typed build records decoded from the Buildbot v2 API
//!
//! The API wraps every property value in a list (`[value, source]`); only the
//! first element carries the value.

use crate::error::{BuildPairError, BuildPairResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A build property as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Property(Vec<Value>);

impl Property {
    /// Create a property from its raw list
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// The property value (first list element)
    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }

    /// The property value when it is a string
    pub fn first_str(&self) -> Option<&str> {
        self.first().and_then(Value::as_str)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self(vec![Value::String(value.to_string())])
    }
}

/// Properties selected by the builder queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_speed: Option<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub got_revision: Option<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<Property>,

    /// Any other property the server chose to include
    #[serde(flatten)]
    pub other: BTreeMap<String, Property>,
}

/// One execution of a builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Pipeline the build belongs to
    #[serde(rename = "builderid")]
    pub builder_id: u32,

    /// Server-wide build identifier
    #[serde(rename = "buildid")]
    pub build_id: u64,

    /// Only read from initiator builds
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<DateTime<Utc>>,

    /// `None` while the build is still running
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub complete_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub properties: BuildProperties,

    /// Remaining API fields, kept so records survive a cache round trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decoded response of one builder query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildCollection {
    pub builds: Vec<BuildRecord>,

    /// Pagination metadata, unused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl BuildCollection {
    /// Decode a raw API document, naming `origin` on failure
    pub fn from_value(origin: &str, value: Value) -> BuildPairResult<Self> {
        serde_json::from_value(value).map_err(|e| BuildPairError::schema(origin, e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}

/// Number of entries in a raw API document's `builds` array
pub fn raw_build_count(value: &Value) -> Option<usize> {
    value.get("builds").and_then(Value::as_array).map(Vec::len)
}

/// Browsers exercised by the pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl Browser {
    /// Browsers run for a `build_speed` value; anything but `"fast"` is slow
    pub fn for_speed(speed: &Value) -> [Browser; 2] {
        if speed.as_str() == Some("fast") {
            [Browser::Chrome, Browser::Firefox]
        } else {
            [Browser::Edge, Browser::Safari]
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Firefox => "firefox",
            Self::Edge => "edge",
            Self::Safari => "safari",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_api_build() {
        let value = json!({
            "builds": [{
                "builderid": 2,
                "buildid": 10,
                "number": 7,
                "started_at": 1000,
                "complete_at": null,
                "properties": {
                    "build_speed": ["fast", "Scheduler"],
                    "got_revision": ["abc123", "Git"],
                    "workername": ["worker-1", "Worker"]
                }
            }],
            "meta": {"total": 1}
        });

        let collection = BuildCollection::from_value("initiator", value).unwrap();
        assert_eq!(collection.len(), 1);

        let build = &collection.builds[0];
        assert_eq!(build.builder_id, 2);
        assert_eq!(build.build_id, 10);
        assert_eq!(build.started_at.map(|t| t.timestamp()), Some(1000));
        assert!(build.complete_at.is_none());
        assert_eq!(
            build.properties.build_speed.as_ref().and_then(Property::first_str),
            Some("fast")
        );
        assert!(build.properties.other.contains_key("workername"));
        assert_eq!(build.extra.get("number"), Some(&json!(7)));
    }

    #[test]
    fn missing_builds_is_schema_error() {
        let err = BuildCollection::from_value("uploader-builds.json", json!({"meta": {}}))
            .unwrap_err();
        match err {
            BuildPairError::Schema { origin, reason } => {
                assert_eq!(origin, "uploader-builds.json");
                assert!(reason.contains("builds"));
            }
            other => panic!("expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn non_list_property_is_schema_error() {
        let value = json!({
            "builds": [{
                "builderid": 4,
                "buildid": 20,
                "started_at": 1000,
                "properties": {"revision": "abc123"}
            }]
        });
        assert!(matches!(
            BuildCollection::from_value("uploader", value),
            Err(BuildPairError::Schema { .. })
        ));
    }

    #[test]
    fn build_survives_reserialization() {
        let value = json!({
            "builderid": 4,
            "buildid": 20,
            "started_at": 1000,
            "complete_at": 4600,
            "state_string": "build successful",
            "properties": {"browser_name": ["chrome", "Build"]}
        });
        let build: BuildRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&build).unwrap(), value);
    }

    #[test]
    fn upload_without_start_time_decodes() {
        let value = json!({
            "builds": [{
                "builderid": 4,
                "buildid": 20,
                "complete_at": 4600,
                "properties": {"browser_name": ["chrome", "Build"]}
            }]
        });
        let collection = BuildCollection::from_value("uploader", value).unwrap();
        assert!(collection.builds[0].started_at.is_none());
        assert_eq!(
            collection.builds[0].complete_at.map(|t| t.timestamp()),
            Some(4600)
        );
    }

    #[test]
    fn raw_count_needs_builds_array() {
        assert_eq!(raw_build_count(&json!({"builds": [{"odd": true}, 5]})), Some(2));
        assert_eq!(raw_build_count(&json!({"builds": "none"})), None);
        assert_eq!(raw_build_count(&json!([])), None);
    }

    #[test]
    fn browser_for_speed() {
        assert_eq!(
            Browser::for_speed(&json!("fast")),
            [Browser::Chrome, Browser::Firefox]
        );
        assert_eq!(
            Browser::for_speed(&json!("slow")),
            [Browser::Edge, Browser::Safari]
        );
        assert_eq!(
            Browser::for_speed(&json!(1)),
            [Browser::Edge, Browser::Safari]
        );
    }
}
