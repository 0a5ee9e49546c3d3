//! [`JsonStore`] — the JSON-file implementation of [`RequestStore`].

use std::{
  ffi::OsString,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Utc;
use marquee_core::{
  record::{NewRequest, RequestRecord, RequestResult, RequestStatus},
  store::RequestStore,
};
use tokio::{fs, sync::Mutex};

use crate::{
  Result,
  document::{Document, StoredRecord},
};

/// Default backing file name, used when no path is configured.
pub const DEFAULT_STORE_FILENAME: &str = "requests.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Marquee request store backed by a single JSON file.
///
/// Cloning is cheap and clones share one lock; open the store once per
/// process and clone it into every caller, otherwise the mutual-exclusion
/// guarantee does not hold.
///
/// Every operation re-reads the file, applies its change, and rewrites the
/// whole document through an atomic temp-file rename. The catalog is
/// expected to stay small (tens to low thousands of records), so paying a
/// full rewrite per mutation is fine.
#[derive(Clone)]
pub struct JsonStore {
  inner: Arc<Inner>,
}

struct Inner {
  path: PathBuf,
  lock: Mutex<()>,
}

impl JsonStore {
  /// Create a handle for the store at `path`. No I/O happens until the
  /// first operation; call [`RequestStore::init`] to materialise the file.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self {
      inner: Arc::new(Inner { path: path.into(), lock: Mutex::new(()) }),
    }
  }

  pub fn path(&self) -> &Path { &self.inner.path }

  /// Read and decode the backing file. A missing file is an empty store;
  /// an unreadable one degrades to empty *in memory only* — the on-disk
  /// bytes stay untouched until the next successful save.
  async fn load_unlocked(&self) -> Result<(Document, Vec<RequestRecord>)> {
    let raw = match fs::read_to_string(&self.inner.path).await {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
      Err(e) => return Err(e.into()),
    };

    let document = match Document::decode(&raw) {
      Some(document) => document,
      None => {
        tracing::warn!(
          path = %self.inner.path.display(),
          "backing file is unreadable; continuing with an empty catalog"
        );
        Document::default()
      }
    };

    let Document { requests, extra } = document;
    let mut records: Vec<RequestRecord> =
      requests.into_iter().map(StoredRecord::into_record).collect();

    // Self-healing id density: even a hand-edited file with gaps or
    // duplicate ids comes back as a clean 1..N sequence.
    records.sort_by_key(|r| r.id);
    renumber(&mut records);

    Ok((Document { requests: Vec::new(), extra }, records))
  }

  /// Serialise the full collection and atomically replace the backing
  /// file. The rename is the only state-visible step; a crash before it
  /// leaves the previous committed contents intact.
  async fn save_unlocked(
    &self,
    mut document: Document,
    records: &[RequestRecord],
  ) -> Result<()> {
    document.requests = records.iter().map(StoredRecord::from_record).collect();
    let encoded = document.encode()?;

    if let Some(parent) = self.inner.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).await?;
      }
    }

    let tmp = tmp_path(&self.inner.path);
    fs::write(&tmp, encoded).await?;
    fs::rename(&tmp, &self.inner.path).await?;

    tracing::debug!(
      path = %self.inner.path.display(),
      records = records.len(),
      "persisted catalog"
    );
    Ok(())
  }
}

/// Reassign ids 1..N by position.
fn renumber(records: &mut [RequestRecord]) {
  for (index, record) in records.iter_mut().enumerate() {
    record.id = index as u64 + 1;
  }
}

/// Temporary file colocated with the target, e.g. `requests.json.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
  let mut os: OsString = path.as_os_str().to_owned();
  os.push(".tmp");
  PathBuf::from(os)
}

fn utc_now_string() -> String {
  Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ─── RequestStore impl ───────────────────────────────────────────────────────

impl RequestStore for JsonStore {
  type Error = crate::Error;

  async fn init(&self) -> Result<()> {
    let _guard = self.inner.lock.lock().await;

    if fs::try_exists(&self.inner.path).await? {
      return Ok(());
    }
    self.save_unlocked(Document::default(), &[]).await
  }

  async fn create(&self, input: NewRequest) -> Result<RequestRecord> {
    let _guard = self.inner.lock.lock().await;

    let (document, mut records) = self.load_unlocked().await?;
    let record = RequestRecord {
      id:         records.len() as u64 + 1,
      user_id:    input.user_id,
      platform:   input.platform,
      title:      input.title,
      year:       input.year,
      category:   input.category,
      status:     input.status,
      created_at: utc_now_string(),
      result:     RequestResult::Empty,
    };
    records.push(record.clone());

    self.save_unlocked(document, &records).await?;
    Ok(record)
  }

  async fn list_all(&self) -> Result<Vec<RequestRecord>> {
    let _guard = self.inner.lock.lock().await;

    let (_, records) = self.load_unlocked().await?;
    Ok(records)
  }

  async fn list_open(&self) -> Result<Vec<RequestRecord>> {
    let _guard = self.inner.lock.lock().await;

    let (_, mut records) = self.load_unlocked().await?;
    records.retain(|r| r.status.is_open() && r.result.is_empty());
    Ok(records)
  }

  async fn set_status(&self, id: u64, status: RequestStatus) -> Result<bool> {
    let _guard = self.inner.lock.lock().await;

    let (document, mut records) = self.load_unlocked().await?;
    let Some(record) = records.iter_mut().find(|r| r.id == id) else {
      return Ok(false);
    };
    record.status = status;

    self.save_unlocked(document, &records).await?;
    Ok(true)
  }

  async fn set_result(&self, id: u64, code: &str) -> Result<bool> {
    // Reject before touching the file: the result set is closed.
    let Ok(result) = code.parse::<RequestResult>() else {
      return Ok(false);
    };

    let _guard = self.inner.lock.lock().await;

    let (document, mut records) = self.load_unlocked().await?;
    let Some(record) = records.iter_mut().find(|r| r.id == id) else {
      return Ok(false);
    };
    record.result = result;

    self.save_unlocked(document, &records).await?;
    Ok(true)
  }

  async fn delete(&self, id: u64) -> Result<bool> {
    let _guard = self.inner.lock.lock().await;

    let (document, mut records) = self.load_unlocked().await?;
    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
      return Ok(false);
    }

    // Close the gap the deletion opened.
    renumber(&mut records);

    self.save_unlocked(document, &records).await?;
    Ok(true)
  }
}
