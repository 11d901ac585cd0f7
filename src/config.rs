use crate::annotate::PendingPhoto;
use crate::error::{AppError, Result};
use crate::photo::{Photo, PhotoCaption};
use crate::repository::ProjectRepository;
use crate::shell::{self, Navigation};
use crate::store::JsonFileStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub store_file: String,
    pub navigation_file: String,
    /// Plant the example projects when the store is empty.
    pub seed_when_empty: bool,
    pub watch_interval_ms: u64,
    /// Window of the dashboard's upcoming visits card.
    pub upcoming_visit_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: base.join("SiteDesk"),
            store_file: "projects.json".to_string(),
            navigation_file: "navigation-state.json".to_string(),
            seed_when_empty: true,
            watch_interval_ms: 1000,
            upcoming_visit_days: 7,
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when it is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    pub fn navigation_path(&self) -> PathBuf {
        self.data_dir.join(&self.navigation_file)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(50))
    }
}

pub type SharedRepository = ProjectRepository<Arc<JsonFileStore>>;

/// Everything the desktop commands share.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<JsonFileStore>,
    repo: Mutex<SharedRepository>,
    navigation: Mutex<Navigation>,
    annotation: Mutex<Option<PendingPhoto>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let store = Arc::new(JsonFileStore::new(config.store_path()));
        let repo = if config.seed_when_empty {
            ProjectRepository::open_seeded(store.clone())?
        } else {
            ProjectRepository::open(store.clone())
        };

        let mut navigation = match shell::load_navigation_state(&config.navigation_path()) {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                log::warn!("Discarding navigation state: {}", e);
                Navigation::default()
            }
        };
        navigation.retain_existing(repo.projects());

        Ok(Self {
            config,
            store,
            repo: Mutex::new(repo),
            navigation: Mutex::new(navigation),
            annotation: Mutex::new(None),
        })
    }

    pub fn with_repo<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut SharedRepository) -> Result<R>,
    {
        let mut guard = self
            .repo
            .lock()
            .map_err(|e| AppError::State(format!("project repository lock poisoned: {}", e)))?;
        f(&mut guard)
    }

    pub fn with_navigation<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Navigation) -> Result<R>,
    {
        let mut guard = self
            .navigation
            .lock()
            .map_err(|e| AppError::State(format!("navigation lock poisoned: {}", e)))?;
        f(&mut guard)
    }

    /// The photo currently being annotated, if any.
    pub fn with_annotation<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Option<PendingPhoto>) -> Result<R>,
    {
        let mut guard = self
            .annotation
            .lock()
            .map_err(|e| AppError::State(format!("annotation lock poisoned: {}", e)))?;
        f(&mut guard)
    }

    /// Flattens the open annotation session and stores it as a photo of
    /// `project_id`, then closes the session. The image is rendered with no
    /// lock held; the session stays open when anything fails.
    pub fn save_annotation(
        &self,
        project_id: &str,
        caption: PhotoCaption,
        today: NaiveDate,
    ) -> Result<Photo> {
        self.with_repo(|repo| repo.get(project_id).map(|_| ()))?;
        let pending = self.with_annotation(|slot| {
            slot.clone()
                .ok_or_else(|| AppError::invalid("no photo is being annotated"))
        })?;
        let url = pending.render()?;
        let photo = self.with_repo(|repo| repo.add_photo(project_id, url, caption, today))?;
        self.with_annotation(|slot| {
            *slot = None;
            Ok(())
        })?;
        Ok(photo)
    }

    /// Rereads the store after another process rewrote it and drops
    /// navigation to projects that disappeared.
    pub fn reload(&self) -> Result<usize> {
        let projects = self.with_repo(|repo| {
            repo.reload();
            Ok(repo.projects().to_vec())
        })?;
        self.with_navigation(|nav| {
            nav.retain_existing(&projects);
            Ok(())
        })?;
        Ok(projects.len())
    }
}
