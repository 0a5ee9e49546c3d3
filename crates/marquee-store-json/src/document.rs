//! On-disk document format.
//!
//! The backing file is a single JSON object:
//!
//! ```json
//! {
//!   "meta": { "version": 2 },
//!   "requests": [ { "id": 1, "user_id": "...", ... } ]
//! }
//! ```
//!
//! Decoding is deliberately forgiving: the container must be a JSON object,
//! but a missing or malformed `meta` or `requests` field is tolerated, and
//! individual request entries that fail to decode are skipped rather than
//! poisoning the rest of the file. Encoding always stamps the current
//! format version. Unknown top-level fields ride along unchanged;
//! unknown record-level fields are dropped.

use marquee_core::{
  lifecycle,
  record::{RequestRecord, RequestResult, RequestStatus},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Version 2 added the `result` field.
pub(crate) const FORMAT_VERSION: u32 = 2;

// ─── Stored record ───────────────────────────────────────────────────────────

/// The raw wire shape of one record. Every field is defaulted so files from
/// older format versions keep loading.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
  #[serde(default)]
  pub id:         u64,
  #[serde(default)]
  pub user_id:    String,
  /// Files predating multi-platform support carry no platform field.
  #[serde(default = "default_platform")]
  pub platform:   String,
  #[serde(default)]
  pub title:      String,
  #[serde(default)]
  pub year:       Option<u32>,
  #[serde(default)]
  pub category:   String,
  #[serde(default = "default_status")]
  pub status:     String,
  #[serde(default)]
  pub created_at: String,
  /// Absent before format version 2.
  #[serde(default)]
  pub result:     String,
}

fn default_platform() -> String { "discord".to_owned() }

fn default_status() -> String { RequestStatus::Queued.as_str().to_owned() }

impl StoredRecord {
  /// Decode into the domain type, applying the lifecycle compat policy and
  /// coercing an unrecognised result code to empty.
  pub fn into_record(self) -> RequestRecord {
    let status = RequestStatus::from(self.status);
    let result = RequestResult::from_stored(&self.result);
    let (status, result) = lifecycle::normalize(status, result);

    RequestRecord {
      id: self.id,
      user_id: self.user_id,
      platform: self.platform,
      title: self.title,
      year: self.year.unwrap_or(0),
      category: self.category,
      status,
      created_at: self.created_at,
      result,
    }
  }

  pub fn from_record(record: &RequestRecord) -> Self {
    Self {
      id:         record.id,
      user_id:    record.user_id.clone(),
      platform:   record.platform.clone(),
      title:      record.title.clone(),
      year:       Some(record.year),
      category:   record.category.clone(),
      status:     record.status.as_str().to_owned(),
      created_at: record.created_at.clone(),
      result:     record.result.as_str().to_owned(),
    }
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A decoded backing file: the request entries plus any unrecognised
/// top-level fields, which are preserved across a load/save cycle.
#[derive(Debug, Default)]
pub(crate) struct Document {
  pub requests: Vec<StoredRecord>,
  pub extra:    Map<String, Value>,
}

impl Document {
  /// Decode the raw file contents. Returns `None` when the contents cannot
  /// be read as a JSON object at all — the caller decides how to degrade.
  /// An empty file decodes as an empty document.
  pub fn decode(raw: &str) -> Option<Self> {
    if raw.trim().is_empty() {
      return Some(Self::default());
    }

    let value: Value = serde_json::from_str(raw).ok()?;
    let Value::Object(mut fields) = value else {
      return None;
    };

    // `meta` is rewritten on every save; stale or malformed metadata is
    // dropped here rather than carried through `extra`.
    fields.remove("meta");

    let requests = match fields.remove("requests") {
      Some(Value::Array(entries)) => entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<StoredRecord>(entry).ok())
        .collect(),
      _ => Vec::new(),
    };

    Some(Self { requests, extra: fields })
  }

  /// Encode for disk, stamping the current format version.
  pub fn encode(&self) -> serde_json::Result<String> {
    let mut fields = self.extra.clone();
    fields.insert("meta".to_owned(), json!({ "version": FORMAT_VERSION }));
    fields.insert("requests".to_owned(), serde_json::to_value(&self.requests)?);
    serde_json::to_string_pretty(&Value::Object(fields))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_input_decodes_as_empty_document() {
    let doc = Document::decode("").unwrap();
    assert!(doc.requests.is_empty());
    assert!(doc.extra.is_empty());
  }

  #[test]
  fn non_object_input_is_rejected() {
    assert!(Document::decode("[1, 2, 3]").is_none());
    assert!(Document::decode("not json at all {{{").is_none());
  }

  #[test]
  fn junk_entries_are_skipped() {
    let raw = r#"{
      "meta": { "version": 2 },
      "requests": [
        { "id": 1, "user_id": "u1", "title": "Dune", "year": 2021,
          "category": "film", "status": "queued",
          "created_at": "2024-01-02 03:04:05", "result": "" },
        "not a record",
        42
      ]
    }"#;
    let doc = Document::decode(raw).unwrap();
    assert_eq!(doc.requests.len(), 1);
    assert_eq!(doc.requests[0].title, "Dune");
  }

  #[test]
  fn unknown_top_level_fields_survive_a_round_trip() {
    let raw = r#"{ "meta": { "version": 1 }, "requests": [], "note": "kept" }"#;
    let doc = Document::decode(raw).unwrap();
    let encoded = doc.encode().unwrap();

    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value["note"], "kept");
    // Malformed or stale meta is normalised to the current version.
    assert_eq!(value["meta"]["version"], FORMAT_VERSION);
  }

  #[test]
  fn old_records_get_field_defaults() {
    let raw = r#"{ "requests": [ { "id": 3, "title": "Alien" } ] }"#;
    let doc = Document::decode(raw).unwrap();
    let record = doc.requests.into_iter().next().unwrap().into_record();

    assert_eq!(record.id, 3);
    assert_eq!(record.platform, "discord");
    assert_eq!(record.year, 0);
    assert_eq!(record.status, marquee_core::record::RequestStatus::Queued);
    assert!(record.result.is_empty());
  }
}
