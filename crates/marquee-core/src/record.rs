//! Record types — the fundamental unit of the Marquee request store.
//!
//! A record is one user-submitted content request (a title, year, category)
//! moving through a small processing lifecycle. The store owns all records
//! exclusively; callers only ever receive cloned snapshots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Processing stage of a request.
///
/// The canonical vocabulary is the four named variants. Anything else a
/// caller writes is carried verbatim in [`RequestStatus::Other`] — there is
/// deliberately no enforced transition table, so the set stays open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
  /// Submitted, nobody has picked it up yet.
  Queued,
  /// An operator is working on it.
  InProgress,
  /// Legacy terminal state; no longer written, still loaded.
  Unavailable,
  /// The title exists but has not been released yet.
  AwaitingRelease,
  /// Any non-canonical status string, preserved as-is.
  Other(String),
}

impl RequestStatus {
  /// The string stored in the `status` field on disk.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Queued => "queued",
      Self::InProgress => "in_progress",
      Self::Unavailable => "unavailable",
      Self::AwaitingRelease => "awaiting_release",
      Self::Other(s) => s,
    }
  }

  /// Whether this status counts as "still being worked" for the open view.
  pub fn is_open(&self) -> bool {
    matches!(self, Self::Queued | Self::InProgress)
  }
}

impl From<String> for RequestStatus {
  fn from(s: String) -> Self {
    match s.as_str() {
      "queued" => Self::Queued,
      "in_progress" => Self::InProgress,
      "unavailable" => Self::Unavailable,
      "awaiting_release" => Self::AwaitingRelease,
      _ => Self::Other(s),
    }
  }
}

impl From<RequestStatus> for String {
  fn from(s: RequestStatus) -> Self { s.as_str().to_owned() }
}

impl fmt::Display for RequestStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Result code ─────────────────────────────────────────────────────────────

/// Final outcome of a request, orthogonal to [`RequestStatus`].
///
/// Unlike status, this set is closed: the store rejects writes outside it
/// and coerces anything unrecognised to [`RequestResult::Empty`] on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestResult {
  /// No determination yet. Stored as the empty string.
  #[default]
  #[serde(rename = "")]
  Empty,
  Available,
  Unavailable,
}

impl RequestResult {
  /// The string stored in the `result` field on disk.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Empty => "",
      Self::Available => "available",
      Self::Unavailable => "unavailable",
    }
  }

  /// Lenient decoding for the load path: anything outside the closed set
  /// becomes [`RequestResult::Empty`].
  pub fn from_stored(code: &str) -> Self {
    code.parse().unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool { matches!(self, Self::Empty) }
}

impl FromStr for RequestResult {
  type Err = Error;

  /// Strict decoding for the write path: unknown codes are an error so that
  /// `set_result` can refuse them before any mutation.
  fn from_str(code: &str) -> Result<Self> {
    match code {
      "" => Ok(Self::Empty),
      "available" => Ok(Self::Available),
      "unavailable" => Ok(Self::Unavailable),
      other => Err(Error::UnknownResultCode(other.to_owned())),
    }
  }
}

impl fmt::Display for RequestResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One tracked content request.
///
/// `id` is dense (1..N) and reassigned whenever a record is deleted, so it
/// is only meaningful within one session of reads — never hold one across a
/// window in which a delete may have run. `created_at` is a plain UTC
/// timestamp string (`YYYY-MM-DD HH:MM:SS`), assigned once by the store and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
  pub id:         u64,
  pub user_id:    String,
  pub platform:   String,
  pub title:      String,
  /// Release year; 0 means unknown/unset.
  pub year:       u32,
  /// Domain tag, e.g. "film" or "series". Opaque to the store.
  pub category:   String,
  pub status:     RequestStatus,
  pub created_at: String,
  pub result:     RequestResult,
}

// ─── NewRequest ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::RequestStore::create`].
/// `id`, `created_at`, and `result` are always set by the store; they are
/// not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewRequest {
  pub user_id:  String,
  pub platform: String,
  pub title:    String,
  pub year:     u32,
  pub category: String,
  pub status:   RequestStatus,
}

impl NewRequest {
  /// Convenience constructor; status starts at [`RequestStatus::Queued`].
  pub fn new(
    user_id: impl Into<String>,
    platform: impl Into<String>,
    title: impl Into<String>,
    year: u32,
    category: impl Into<String>,
  ) -> Self {
    Self {
      user_id:  user_id.into(),
      platform: platform.into(),
      title:    title.into(),
      year,
      category: category.into(),
      status:   RequestStatus::Queued,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_roundtrips_canonical_strings() {
    for raw in ["queued", "in_progress", "unavailable", "awaiting_release"] {
      let status = RequestStatus::from(raw.to_owned());
      assert!(!matches!(status, RequestStatus::Other(_)), "{raw}");
      assert_eq!(status.as_str(), raw);
    }
  }

  #[test]
  fn status_preserves_unknown_strings() {
    let status = RequestStatus::from("on_hold".to_owned());
    assert_eq!(status, RequestStatus::Other("on_hold".into()));
    assert_eq!(status.as_str(), "on_hold");
  }

  #[test]
  fn only_queued_and_in_progress_are_open() {
    assert!(RequestStatus::Queued.is_open());
    assert!(RequestStatus::InProgress.is_open());
    assert!(!RequestStatus::Unavailable.is_open());
    assert!(!RequestStatus::AwaitingRelease.is_open());
    assert!(!RequestStatus::Other("on_hold".into()).is_open());
  }

  #[test]
  fn strict_result_parse_rejects_unknown_codes() {
    assert!("available".parse::<RequestResult>().is_ok());
    assert!("".parse::<RequestResult>().is_ok());
    let err = "maybe".parse::<RequestResult>().unwrap_err();
    assert!(matches!(err, Error::UnknownResultCode(ref c) if c == "maybe"));
  }

  #[test]
  fn lenient_result_decode_coerces_to_empty() {
    assert_eq!(RequestResult::from_stored("available"), RequestResult::Available);
    assert_eq!(RequestResult::from_stored("maybe"), RequestResult::Empty);
    assert_eq!(RequestResult::from_stored(""), RequestResult::Empty);
  }
}
