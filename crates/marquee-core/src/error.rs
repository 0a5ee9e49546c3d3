//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown result code: {0:?}")]
  UnknownResultCode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
