//! JSON-file backend for the Marquee request store.
//!
//! The whole catalog lives in one JSON document that is rewritten in full on
//! every mutation, behind a single async mutex. Writes go to a colocated
//! temporary file that is atomically renamed over the target, so a reader
//! never observes a half-written document.

mod document;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_STORE_FILENAME, JsonStore};
