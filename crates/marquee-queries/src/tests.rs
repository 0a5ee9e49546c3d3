use marquee_core::record::{NewRequest, RequestRecord, RequestResult, RequestStatus};
use marquee_core::store::RequestStore;
use marquee_store_json::JsonStore;
use tempfile::TempDir;

use super::*;

fn record(id: u64, user: &str, title: &str, year: u32, category: &str) -> RequestRecord {
  RequestRecord {
    id,
    user_id: user.to_owned(),
    platform: "discord".to_owned(),
    title: title.to_owned(),
    year,
    category: category.to_owned(),
    status: RequestStatus::Queued,
    created_at: "2024-06-01 12:00:00".to_owned(),
    result: RequestResult::Empty,
  }
}

#[test]
fn find_by_id_hits_and_misses() {
  let records = vec![record(1, "u1", "Dune", 2021, "film")];
  assert!(find_by_id(&records, 1).is_some());
  assert!(find_by_id(&records, 2).is_none());
}

#[test]
fn duplicate_ignores_case_and_surrounding_whitespace() {
  let records = vec![
    record(1, "u1", "Dune", 2021, "film"),
    record(2, "u2", "Severance", 2022, "series"),
  ];

  let hit = find_duplicate(&records, "  dUNe ", 2021, "film");
  assert_eq!(hit.map(|r| r.id), Some(1));
}

#[test]
fn duplicate_requires_matching_year_and_category() {
  let records = vec![record(1, "u1", "Dune", 2021, "film")];

  assert!(find_duplicate(&records, "Dune", 1984, "film").is_none());
  assert!(find_duplicate(&records, "Dune", 2021, "series").is_none());
}

#[test]
fn by_user_filters_on_the_exact_id() {
  let records = vec![
    record(1, "u1", "Dune", 2021, "film"),
    record(2, "u2", "Severance", 2022, "series"),
    record(3, "u1", "Alien", 1979, "film"),
  ];

  let mine = by_user(&records, "u1");
  assert_eq!(mine.len(), 2);
  assert!(mine.iter().all(|r| r.user_id == "u1"));
}

#[test]
fn day_count_matches_on_the_date_prefix() {
  let mut records = vec![
    record(1, "u1", "Dune", 2021, "film"),
    record(2, "u1", "Alien", 1979, "film"),
    record(3, "u2", "Severance", 2022, "series"),
  ];
  records[1].created_at = "2024-06-02 00:30:00".to_owned();

  assert_eq!(created_on_day_by_user(&records, "u1", "2024-06-01"), 1);
  assert_eq!(created_on_day_by_user(&records, "u1", "2024-06-02"), 1);
  assert_eq!(created_on_day_by_user(&records, "u2", "2024-06-03"), 0);
}

#[test]
fn daily_quota_gates_the_fourth_request() {
  let mut records: Vec<RequestRecord> = (1..=3)
    .map(|i| record(i, "u1", &format!("Title {i}"), 2000, "film"))
    .collect();
  records.push(record(4, "u2", "Severance", 2022, "series"));

  // A fourth submission from u1 today would exceed the limit; u2 is fine.
  let mine = created_on_day_by_user(&records, "u1", "2024-06-01");
  assert_eq!(mine, limits::DAILY_REQUESTS_PER_USER);
  assert!(mine >= limits::DAILY_REQUESTS_PER_USER);
  assert!(
    created_on_day_by_user(&records, "u2", "2024-06-01")
      < limits::DAILY_REQUESTS_PER_USER
  );
}

#[test]
fn title_search_is_a_case_insensitive_substring() {
  let records = vec![
    record(1, "u1", "Dune", 2021, "film"),
    record(2, "u2", "Dune: Part Two", 2024, "film"),
    record(3, "u3", "Severance", 2022, "series"),
  ];

  let hits = search_title(&records, " dune");
  assert_eq!(hits.len(), 2);
  assert!(search_title(&records, "alien").is_empty());
}

// ─── Store-level wrappers ────────────────────────────────────────────────────

#[tokio::test]
async fn wrappers_run_against_a_real_store() {
  let dir = TempDir::new().unwrap();
  let store = JsonStore::open(dir.path().join("requests.json"));

  store
    .create(NewRequest::new("u1", "discord", "Dune", 2021, "film"))
    .await
    .unwrap();
  store
    .create(NewRequest::new("u2", "telegram", "Severance", 2022, "series"))
    .await
    .unwrap();

  let hit = get_by_id(&store, 2).await.unwrap().unwrap();
  assert_eq!(hit.title, "Severance");

  let dup = duplicate_of(&store, "dune ", 2021, "film").await.unwrap();
  assert_eq!(dup.map(|r| r.id), Some(1));

  let mine = list_by_user(&store, "u1").await.unwrap();
  assert_eq!(mine.len(), 1);

  // Both records were created just now, so today's count is exact.
  assert_eq!(count_created_today_by_user(&store, "u1").await.unwrap(), 1);
  assert_eq!(count_created_today_by_user(&store, "u3").await.unwrap(), 0);
}
