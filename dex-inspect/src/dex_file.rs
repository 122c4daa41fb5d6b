//! Dex file envelope
//!
//! A dex file is a JSON document wrapping a list of events, each of which
//! carries its group records: `{"type": "firebird-dex-json", "version": ...,
//! "events": [{"id": ..., "groups": [...]}]}`. Only the envelope is typed
//! here; the group records stay generic until the registry dispatches them.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use dex_core::DexObject;

/// Envelope `type` value identifying a dex JSON document
pub const DEX_FORMAT_TYPE: &str = "firebird-dex-json";

/// Top-level dex document
#[derive(Debug, Deserialize)]
pub struct DexFile {
    #[serde(rename = "type")]
    pub format: String,
    #[serde(default)]
    pub version: Option<String>,
    pub events: Vec<DexEvent>,
}

/// One event and its untyped group records
#[derive(Debug, Deserialize)]
pub struct DexEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub groups: Vec<DexObject>,
}

impl DexFile {
    /// Parse a dex document and check its envelope type
    pub fn parse(text: &str) -> Result<Self> {
        let file: DexFile = serde_json::from_str(text).context("failed to parse dex JSON")?;

        if file.format != DEX_FORMAT_TYPE {
            return Err(anyhow!(
                "not a dex file: envelope type is '{}', expected '{DEX_FORMAT_TYPE}'",
                file.format
            ));
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let file = DexFile::parse(
            r#"{
                "type": "firebird-dex-json",
                "version": "0.04",
                "events": [
                    {"id": "event 0", "groups": [{"type": "BoxTrackerHit", "name": "hits", "hits": []}]},
                    {"id": "event 1"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.version.as_deref(), Some("0.04"));
        assert_eq!(file.events.len(), 2);
        assert_eq!(file.events[0].id.as_deref(), Some("event 0"));
        assert_eq!(file.events[0].groups.len(), 1);
        assert!(file.events[1].groups.is_empty());
    }

    #[test]
    fn test_parse_rejects_foreign_envelope() {
        let err = DexFile::parse(r#"{"type": "something-else", "events": []}"#).unwrap_err();
        assert!(err.to_string().contains("not a dex file"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(DexFile::parse("{").is_err());
    }
}
