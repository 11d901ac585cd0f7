//! Persistence of the project list as a single JSON document.
//!
//! Loading never fails: a missing or malformed document is logged and read
//! as an empty list. A malformed file is first renamed to
//! `<name>.corrupt-<timestamp>` so a later save cannot overwrite it. Every successful save is announced on a broadcast
//! channel, and [`StoreWatcher`] announces rewrites made by another window or
//! process so subscribers can reload. Concurrent writers are not merged; the
//! last one to save wins.

use crate::error::{AppError, Result};
use crate::project::Project;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tokio::sync::broadcast;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreChange {
    /// This process wrote the document.
    Saved,
    /// Somebody else rewrote the document since we last read or wrote it.
    External,
}

pub trait ProjectStore: Send + Sync {
    fn load(&self) -> Vec<Project>;
    fn save(&self, projects: &[Project]) -> Result<()>;
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}

impl<T: ProjectStore + ?Sized> ProjectStore for Arc<T> {
    fn load(&self) -> Vec<Project> {
        (**self).load()
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        (**self).save(projects)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        (**self).subscribe()
    }
}

/// Parses a stored document; `None` when it is not a project list.
pub fn decode_projects(json: &str) -> Option<Vec<Project>> {
    if json.trim().is_empty() {
        return Some(Vec::new());
    }
    match serde_json::from_str::<Vec<Project>>(json) {
        Ok(projects) => Some(projects),
        Err(e) => {
            log::warn!("Ignoring malformed project document: {}", e);
            None
        }
    }
}

/// Modification time plus length, good enough to notice a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn read(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

pub struct JsonFileStore {
    path: PathBuf,
    known: Mutex<Option<FileStamp>>,
    changes: broadcast::Sender<StoreChange>,
    /// Set when an unreadable document could not be moved aside; saves are
    /// refused until it is readable again.
    blocked: AtomicBool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            path: path.into(),
            known: Mutex::new(None),
            changes,
            blocked: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames an unreadable document next to itself and returns the new path.
    fn quarantine(&self) -> Option<PathBuf> {
        let file_name = self.path.file_name()?.to_string_lossy().into_owned();
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
        let backup = self
            .path
            .with_file_name(format!("{}.corrupt-{}", file_name, stamp));
        match fs::rename(&self.path, &backup) {
            Ok(()) => Some(backup),
            Err(e) => {
                log::error!(
                    "Failed to move unreadable project store {} aside: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn read_document(&self) -> Option<Vec<Project>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read project store {}: {}", self.path.display(), e);
                return None;
            }
        };
        match String::from_utf8(bytes) {
            Ok(json) => decode_projects(&json),
            Err(e) => {
                log::warn!("Project store {} is not UTF-8: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Compares the file against the last state this store saw and publishes
    /// [`StoreChange::External`] when it differs. Returns whether it did.
    pub fn check_external_change(&self) -> bool {
        let current = FileStamp::read(&self.path);
        let Ok(mut known) = self.known.lock() else {
            return false;
        };
        if *known == current {
            return false;
        }
        *known = current;
        log::info!("Project store changed externally: {}", self.path.display());
        let _ = self.changes.send(StoreChange::External);
        true
    }

    fn remember_current_stamp(&self) {
        if let Ok(mut known) = self.known.lock() {
            *known = FileStamp::read(&self.path);
        }
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Vec<Project> {
        if !self.path.exists() {
            self.remember_current_stamp();
            self.blocked.store(false, Ordering::SeqCst);
            log::debug!("No project store at {}", self.path.display());
            return Vec::new();
        }
        let projects = self.read_document();
        if projects.is_none() {
            match self.quarantine() {
                Some(backup) => {
                    log::warn!("Moved unreadable project store to {}", backup.display());
                    self.blocked.store(false, Ordering::SeqCst);
                }
                None => self.blocked.store(true, Ordering::SeqCst),
            }
        } else {
            self.blocked.store(false, Ordering::SeqCst);
        }
        // Remember what we read so the watcher does not report it back
        self.remember_current_stamp();
        projects.unwrap_or_default()
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        if self.blocked.load(Ordering::SeqCst) {
            return Err(AppError::State(format!(
                "project store {} is unreadable and was left untouched",
                self.path.display()
            )));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(projects)?;

        // Write-then-rename so a crash never leaves half a document behind
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        self.remember_current_stamp();
        log::debug!("Saved {} projects to {}", projects.len(), self.path.display());
        let _ = self.changes.send(StoreChange::Saved);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

/// In-memory store holding the serialized document, for tests and previews.
pub struct MemoryStore {
    document: Mutex<Option<String>>,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            document: Mutex::new(None),
            changes,
        }
    }

    pub fn with_document(json: impl Into<String>) -> Self {
        let store = Self::new();
        store.replace_document(json);
        store
    }

    pub fn document(&self) -> Option<String> {
        self.document.lock().ok().and_then(|doc| doc.clone())
    }

    /// Simulates another writer replacing the whole document.
    pub fn replace_document(&self, json: impl Into<String>) {
        if let Ok(mut doc) = self.document.lock() {
            *doc = Some(json.into());
        }
        let _ = self.changes.send(StoreChange::External);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self) -> Vec<Project> {
        self.document()
            .and_then(|json| decode_projects(&json))
            .unwrap_or_default()
    }

    fn save(&self, projects: &[Project]) -> Result<()> {
        let json = serde_json::to_string(projects)?;
        if let Ok(mut doc) = self.document.lock() {
            *doc = Some(json);
        }
        let _ = self.changes.send(StoreChange::Saved);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}

/// Polls a [`JsonFileStore`] for rewrites made outside this process.
pub struct StoreWatcher {
    store: Arc<JsonFileStore>,
    interval: Duration,
}

impl StoreWatcher {
    pub fn new(store: Arc<JsonFileStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Runs until the task is dropped or aborted.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.store.check_external_change();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDetails;

    fn sample() -> Vec<Project> {
        vec![Project::new(ProjectDetails {
            name: "Residencial Parque Verde".into(),
            budget: 800_000.0,
            ..Default::default()
        })]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("projects.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());

        fs::write(&path, r#"{"projects": []}"#).unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    fn corrupt_backups(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.to_string_lossy().contains(".corrupt-"))
            .collect()
    }

    #[test]
    fn malformed_file_is_moved_aside_before_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let original = r#"[{"id": 1, "name": "Minha Obra Real", "budget": 900000},]"#;
        fs::write(&path, original).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
        assert!(!path.exists());

        let backups = corrupt_backups(dir.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), original);

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), original);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("projects.json"));
        let projects = sample();
        store.save(&projects).unwrap();
        assert_eq!(store.load(), projects);
        assert!(!dir.path().join("nested").join("projects.json.tmp").exists());
    }

    #[test]
    fn save_is_announced() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();
        store.save(&sample()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreChange::Saved);
    }

    #[test]
    fn external_rewrite_is_detected_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();
        let mut rx = store.subscribe();

        assert!(!store.check_external_change());

        fs::write(&path, "[]").unwrap();
        assert!(store.check_external_change());
        assert_eq!(rx.try_recv().unwrap(), StoreChange::External);
        assert!(!store.check_external_change());
    }

    #[tokio::test]
    async fn watcher_publishes_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let store = Arc::new(JsonFileStore::new(&path));
        store.save(&sample()).unwrap();
        let mut rx = store.subscribe();

        let watcher = tokio::spawn(
            StoreWatcher::new(store.clone(), Duration::from_millis(10)).run(),
        );
        fs::write(&path, "[]").unwrap();

        let change = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("watcher did not report the rewrite")
            .unwrap();
        assert_eq!(change, StoreChange::External);
        watcher.abort();
    }
}
