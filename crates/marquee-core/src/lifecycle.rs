//! Lifecycle compatibility policy.
//!
//! The on-disk format evolved twice while staying byte-compatible with older
//! files. Instead of a one-time migration, every load passes each record
//! through [`normalize`], which rewrites the two retired status spellings
//! into the current vocabulary. Nothing is persisted back until the record's
//! collection is next saved.

use crate::record::{RequestResult, RequestStatus};

/// Retired status: a determination of "available" used to be expressed as a
/// status rather than a result.
const LEGACY_AVAILABLE: &str = "available";

/// Retired status: terminal "processed" records are now just in-progress
/// records with whatever result was recorded.
const LEGACY_PROCESSED: &str = "processed";

/// Rewrite a loaded (status, result) pair into the current vocabulary.
///
/// - legacy `available` status with no recorded result becomes
///   `in_progress` + result `available`;
/// - legacy `processed` status becomes `in_progress`;
/// - everything else passes through untouched.
pub fn normalize(
  status: RequestStatus,
  result: RequestResult,
) -> (RequestStatus, RequestResult) {
  match status {
    RequestStatus::Other(ref s) if s == LEGACY_AVAILABLE => {
      let result = if result.is_empty() {
        RequestResult::Available
      } else {
        result
      };
      (RequestStatus::InProgress, result)
    }
    RequestStatus::Other(ref s) if s == LEGACY_PROCESSED => {
      (RequestStatus::InProgress, result)
    }
    _ => (status, result),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn legacy_available_becomes_in_progress_with_result() {
    let (status, result) = normalize(
      RequestStatus::Other("available".into()),
      RequestResult::Empty,
    );
    assert_eq!(status, RequestStatus::InProgress);
    assert_eq!(result, RequestResult::Available);
  }

  #[test]
  fn legacy_available_keeps_an_existing_result() {
    let (status, result) = normalize(
      RequestStatus::Other("available".into()),
      RequestResult::Unavailable,
    );
    assert_eq!(status, RequestStatus::InProgress);
    assert_eq!(result, RequestResult::Unavailable);
  }

  #[test]
  fn legacy_processed_becomes_in_progress() {
    let (status, result) =
      normalize(RequestStatus::Other("processed".into()), RequestResult::Empty);
    assert_eq!(status, RequestStatus::InProgress);
    assert_eq!(result, RequestResult::Empty);
  }

  #[test]
  fn current_vocabulary_passes_through() {
    let (status, result) =
      normalize(RequestStatus::AwaitingRelease, RequestResult::Available);
    assert_eq!(status, RequestStatus::AwaitingRelease);
    assert_eq!(result, RequestResult::Available);
  }

  #[test]
  fn unknown_statuses_pass_through() {
    let (status, _) =
      normalize(RequestStatus::Other("on_hold".into()), RequestResult::Empty);
    assert_eq!(status, RequestStatus::Other("on_hold".into()));
  }
}
