//! On-disk dataset model for decoded telemetry frames.
//!
//! A dataset file pairs provenance metadata with a list of frames; each
//! frame maps field names to a `{value, unit}` pair. Numeric values feed
//! inference, text values (callsigns, status strings) ride along and are
//! filtered out when the dataset is flattened into a table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Version tag written into dataset metadata.
pub const DATA_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    DATA_FORMAT_VERSION
}

/// Dataset provenance: which satellite the frames came from and which
/// revision of the on-disk format they use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    #[serde(default = "default_format_version")]
    pub data_format_version: u32,
    #[serde(default)]
    pub satellite_norad: Option<String>,
    #[serde(default)]
    pub satellite_name: Option<String>,
}

impl Default for DatasetMetadata {
    fn default() -> Self {
        Self {
            data_format_version: DATA_FORMAT_VERSION,
            satellite_norad: None,
            satellite_name: None,
        }
    }
}

impl DatasetMetadata {
    pub fn for_satellite(norad_id: &str, name: &str) -> Self {
        Self {
            data_format_version: DATA_FORMAT_VERSION,
            satellite_norad: Some(norad_id.to_string()),
            satellite_name: Some(name.to_string()),
        }
    }
}

/// A decoded field value.
///
/// Deserialization is untagged: JSON numbers become [`FieldValue::Number`],
/// strings become [`FieldValue::Text`], booleans become [`FieldValue::Bool`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Numeric view of the value. Text, boolean, and non-finite numeric
    /// values yield `None` and are excluded from inference tables.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// One named field inside a frame: the measured value and its unit, if a
/// normalizer assigned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameField {
    pub value: FieldValue,
    #[serde(default)]
    pub unit: Option<String>,
}

impl FrameField {
    pub fn new(value: impl Into<FieldValue>, unit: Option<&str>) -> Self {
        Self {
            value: value.into(),
            unit: unit.map(str::to_string),
        }
    }
}

/// One decoded telemetry frame: a receive timestamp plus named fields.
///
/// Fields are kept in a sorted map so serialized output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    #[serde(with = "frame_time")]
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FrameField>,
}

impl TelemetryFrame {
    pub fn new(time: DateTime<Utc>, fields: BTreeMap<String, FrameField>) -> Self {
        Self {
            time,
            tags: BTreeMap::new(),
            fields,
        }
    }
}

/// A dataset file: provenance metadata plus decoded frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryDataset {
    pub metadata: DatasetMetadata,
    pub frames: Vec<TelemetryFrame>,
}

impl TelemetryDataset {
    pub fn new(metadata: DatasetMetadata, frames: Vec<TelemetryFrame>) -> Self {
        Self { metadata, frames }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Frame timestamps are written as `YYYY-MM-DD HH:MM:SS` (UTC, no offset);
/// RFC 3339 input is also accepted.
mod frame_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, FORMAT) {
            return Ok(naive.and_utc());
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> TelemetryDataset {
        let mut fields = BTreeMap::new();
        fields.insert("src_callsign".to_string(), FrameField::new("KK6HIT", None));
        fields.insert(
            "daughter_atmp".to_string(),
            FrameField::new(25.5, Some("degC")),
        );
        let time = "2019-07-21 07:17:42";
        let frame = TelemetryFrame::new(
            chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S")
                .expect("timestamp should parse")
                .and_utc(),
            fields,
        );
        TelemetryDataset::new(
            DatasetMetadata::for_satellite("44420", "LightSail-2"),
            vec![frame],
        )
    }

    #[test]
    fn test_json_round_trip() {
        let dataset = sample_dataset();
        let json = dataset.to_json().expect("serialization should succeed");
        let restored = TelemetryDataset::from_json(&json).expect("parse should succeed");
        assert_eq!(restored, dataset);
    }

    #[test]
    fn test_frame_time_format() {
        let dataset = sample_dataset();
        let json = dataset.to_json().expect("serialization should succeed");
        assert!(json.contains("\"2019-07-21 07:17:42\""));
    }

    #[test]
    fn test_metadata_version_defaulted() {
        let json = r#"{
            "metadata": {"satellite_norad": "44420", "satellite_name": "LightSail-2"},
            "frames": []
        }"#;
        let dataset = TelemetryDataset::from_json(json).expect("parse should succeed");
        assert_eq!(dataset.metadata.data_format_version, DATA_FORMAT_VERSION);
        assert_eq!(dataset.metadata.satellite_name.as_deref(), Some("LightSail-2"));
    }

    #[test]
    fn test_field_value_untagged_parse() {
        let field: FrameField =
            serde_json::from_str(r#"{"value": 42, "unit": "V"}"#).expect("number should parse");
        assert_eq!(field.value.as_f64(), Some(42.0));
        assert_eq!(field.unit.as_deref(), Some("V"));

        let field: FrameField =
            serde_json::from_str(r#"{"value": "N6CP", "unit": null}"#).expect("text should parse");
        assert_eq!(field.value.as_f64(), None);
        assert_eq!(field.value.as_str(), Some("N6CP"));

        let field: FrameField =
            serde_json::from_str(r#"{"value": true}"#).expect("bool should parse");
        assert_eq!(field.value, FieldValue::Bool(true));
        assert_eq!(field.value.as_f64(), None);
    }

    #[test]
    fn test_rfc3339_time_accepted() {
        let json = r#"{"time": "2019-07-21T07:17:42+00:00", "fields": {}}"#;
        let frame: TelemetryFrame = serde_json::from_str(json).expect("parse should succeed");
        assert_eq!(frame.time.timestamp(), 1_563_693_462);
    }
}
