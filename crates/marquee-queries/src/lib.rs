//! Derived queries for the chat-platform adapters.
//!
//! Everything here is a pure projection over a [`RequestStore::list_all`]
//! snapshot — no query touches store internals, and none of them mutate.
//! Each query comes in two forms: a slice-level function for callers that
//! already hold a snapshot, and an async convenience wrapper generic over
//! any [`RequestStore`].
//!
//! Ids are only stable within one snapshot: a concurrent delete renumbers
//! the catalog, so resolve an id and act on it inside the same interaction.

pub mod limits;

use chrono::Utc;
use marquee_core::{record::RequestRecord, store::RequestStore};

// ─── Slice-level queries ─────────────────────────────────────────────────────

pub fn find_by_id(records: &[RequestRecord], id: u64) -> Option<&RequestRecord> {
  records.iter().find(|r| r.id == id)
}

/// Duplicate identity is (trimmed case-insensitive title, year, category).
/// Returns the first existing record that matches.
pub fn find_duplicate<'a>(
  records: &'a [RequestRecord],
  title: &str,
  year: u32,
  category: &str,
) -> Option<&'a RequestRecord> {
  let wanted = normalize_title(title);
  records.iter().find(|r| {
    normalize_title(&r.title) == wanted && r.year == year && r.category == category
  })
}

pub fn by_user<'a>(
  records: &'a [RequestRecord],
  user_id: &str,
) -> Vec<&'a RequestRecord> {
  records.iter().filter(|r| r.user_id == user_id).collect()
}

/// How many requests `user_id` submitted on `date` (a `YYYY-MM-DD` string).
/// `created_at` is matched by date prefix, the same way the stored
/// timestamp strings have always been compared.
pub fn created_on_day_by_user(
  records: &[RequestRecord],
  user_id: &str,
  date: &str,
) -> usize {
  records
    .iter()
    .filter(|r| r.user_id == user_id && r.created_at.starts_with(date))
    .count()
}

/// Case-insensitive substring match over titles.
pub fn search_title<'a>(
  records: &'a [RequestRecord],
  needle: &str,
) -> Vec<&'a RequestRecord> {
  let needle = needle.trim().to_lowercase();
  records
    .iter()
    .filter(|r| r.title.to_lowercase().contains(&needle))
    .collect()
}

fn normalize_title(title: &str) -> String {
  title.trim().to_lowercase()
}

// ─── Store-level wrappers ────────────────────────────────────────────────────

pub async fn get_by_id<S: RequestStore>(
  store: &S,
  id: u64,
) -> Result<Option<RequestRecord>, S::Error> {
  let records = store.list_all().await?;
  Ok(find_by_id(&records, id).cloned())
}

pub async fn duplicate_of<S: RequestStore>(
  store: &S,
  title: &str,
  year: u32,
  category: &str,
) -> Result<Option<RequestRecord>, S::Error> {
  let records = store.list_all().await?;
  Ok(find_duplicate(&records, title, year, category).cloned())
}

pub async fn list_by_user<S: RequestStore>(
  store: &S,
  user_id: &str,
) -> Result<Vec<RequestRecord>, S::Error> {
  let records = store.list_all().await?;
  Ok(by_user(&records, user_id).into_iter().cloned().collect())
}

/// How many requests `user_id` submitted today (UTC). Adapters compare this
/// against [`limits::DAILY_REQUESTS_PER_USER`] before accepting a new one.
pub async fn count_created_today_by_user<S: RequestStore>(
  store: &S,
  user_id: &str,
) -> Result<usize, S::Error> {
  let today = Utc::now().format("%Y-%m-%d").to_string();
  let records = store.list_all().await?;
  Ok(created_on_day_by_user(&records, user_id, &today))
}

#[cfg(test)]
mod tests;
