//! The `RequestStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `marquee-store-json`).
//! Higher layers (the chat-platform adapters, `marquee-queries`,
//! `marquee-cli`) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{NewRequest, RequestRecord, RequestStatus};

/// Abstraction over a Marquee request store backend.
///
/// Every operation is strongly serialized: at most one runs at a time,
/// process-wide, and each observes a fully-applied prior state. Ids are
/// dense (1..N) and reassigned after every delete, so an id a caller has
/// shown to a user must be re-resolved if a delete could have run since.
///
/// Absent ids and invalid inputs come back as `Ok(false)`; only faults of
/// the backing medium surface as `Err`.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait RequestStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Ensure a backing store exists, creating an empty one if absent.
  /// Idempotent; touches nothing when the store is already present.
  fn init(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append a new record with a fresh id (current count + 1), a
  /// store-assigned UTC `created_at`, and an empty result. Returns the
  /// persisted record.
  fn create(
    &self,
    input: NewRequest,
  ) -> impl Future<Output = Result<RequestRecord, Self::Error>> + Send + '_;

  /// Full snapshot in ascending id order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<RequestRecord>, Self::Error>> + Send + '_;

  /// Records still being worked: status queued or in-progress, and no
  /// result recorded yet.
  fn list_open(
    &self,
  ) -> impl Future<Output = Result<Vec<RequestRecord>, Self::Error>> + Send + '_;

  /// Overwrite the status of the record with `id`. Any status value is
  /// accepted; there is no transition table. Returns `false` if `id` is
  /// not present.
  fn set_status(
    &self,
    id: u64,
    status: RequestStatus,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set the result of the record with `id` from its wire code
  /// (`""`, `"available"`, or `"unavailable"`). Returns `false`, mutating
  /// nothing, when the code is outside that set or `id` is not present.
  fn set_result<'a>(
    &'a self,
    id: u64,
    code: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove the record with `id`, then renumber the survivors 1..N in
  /// ascending prior-id order. Returns `false`, mutating nothing, if `id`
  /// is not present.
  fn delete(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
