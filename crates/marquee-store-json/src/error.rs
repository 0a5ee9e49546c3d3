//! Error type for `marquee-store-json`.
//!
//! Only faults of the backing medium live here. "Not found" and "invalid
//! input" outcomes are booleans on the store operations, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
