use crate::error::{AppError, Result};
use crate::metrics;
use crate::project::Project;
use crate::seed;
use crate::store::ProjectStore;
use std::collections::HashSet;

/// The in-memory project list, materialised from a [`ProjectStore`].
///
/// Mutations are copy-on-write: the list is cloned, changed, normalised and
/// persisted, and only swapped in once the save succeeded.
pub struct ProjectRepository<S: ProjectStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: ProjectStore> ProjectRepository<S> {
    pub fn open(store: S) -> Self {
        let mut projects = store.load();
        normalize_all(&mut projects);
        log::info!("Loaded {} projects", projects.len());
        Self { store, projects }
    }

    /// Like [`open`](Self::open), but plants the example sites into an empty store.
    pub fn open_seeded(store: S) -> Result<Self> {
        let mut repo = Self::open(store);
        if repo.projects.is_empty() {
            log::info!("Project store is empty, seeding example projects");
            let seeded = repo.commit(|projects| {
                projects.extend(seed::example_projects());
                Ok(())
            });
            if let Err(e) = seeded {
                log::warn!("Could not seed example projects: {}", e);
            }
        }
        Ok(repo)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn get(&self, project_id: &str) -> Result<&Project> {
        self.find(project_id)
            .ok_or_else(|| AppError::ProjectNotFound(project_id.to_string()))
    }

    /// Drops the in-memory copy and rereads the store.
    pub fn reload(&mut self) {
        let mut projects = self.store.load();
        normalize_all(&mut projects);
        log::debug!("Reloaded {} projects", projects.len());
        self.projects = projects;
    }

    pub(crate) fn commit<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Project>) -> Result<T>,
    {
        let mut next = self.projects.clone();
        let out = change(&mut next)?;
        normalize_all(&mut next);
        self.store.save(&next)?;
        self.projects = next;
        Ok(out)
    }

    pub(crate) fn commit_project<T, F>(&mut self, project_id: &str, change: F) -> Result<T>
    where
        F: FnOnce(&mut Project) -> Result<T>,
    {
        self.commit(|projects| {
            let project = projects
                .iter_mut()
                .find(|p| p.id == project_id)
                .ok_or_else(|| AppError::ProjectNotFound(project_id.to_string()))?;
            change(project)
        })
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Fills in missing or duplicated ids and recomputes derived progress.
///
/// Visit ids are kept unique across all projects since visits are addressed
/// without their project.
pub fn normalize_all(projects: &mut [Project]) {
    ensure_ids(projects.iter_mut().map(|p| &mut p.id));
    ensure_ids(
        projects
            .iter_mut()
            .flat_map(|p| p.visits.iter_mut())
            .map(|v| &mut v.id),
    );
    for project in projects.iter_mut() {
        normalize_children(project);
        metrics::recompute_progress(project);
    }
}

fn ensure_ids<'a>(ids: impl Iterator<Item = &'a mut String>) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() || !seen.insert(id.clone()) {
            *id = new_id();
            seen.insert(id.clone());
        }
    }
}

fn normalize_children(project: &mut Project) {
    ensure_ids(project.materials.iter_mut().map(|m| &mut m.id));
    ensure_ids(project.photos.iter_mut().map(|p| &mut p.id));
    ensure_ids(
        project
            .documents
            .iter_mut()
            .flat_map(|c| c.items.iter_mut())
            .map(|d| &mut d.id),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn duplicate_and_missing_ids_are_replaced() {
        let store = MemoryStore::with_document(
            r#"[{"id": 1, "name": "A"}, {"id": 1, "name": "B"}, {"name": "C"}]"#,
        );
        let repo = ProjectRepository::open(store);
        let ids: HashSet<_> = repo.projects().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(repo.projects()[0].id, "1");
        assert!(!repo.projects()[2].id.is_empty());
    }

    #[test]
    fn visit_ids_are_unique_across_projects() {
        let store = MemoryStore::with_document(
            r#"[{"id": 1, "visits": [{"id": 5}]}, {"id": 2, "visits": [{"id": 5}]}]"#,
        );
        let repo = ProjectRepository::open(store);
        assert_eq!(repo.projects()[0].visits[0].id, "5");
        assert_ne!(repo.projects()[1].visits[0].id, "5");
    }

    #[test]
    fn stale_progress_is_recomputed_on_open() {
        let store = MemoryStore::with_document(
            r#"[{"id": 7, "name": "Obra", "progress": "12.00", "timeline": [
                {"phase": "Fundação", "progress": 0, "tasks": [
                    {"name": "Escavação", "status": "completed", "progress": 100},
                    {"name": "Armação", "status": "in_progress", "progress": 60}
                ]}
            ]}]"#,
        );
        let repo = ProjectRepository::open(store);
        let project = repo.get("7").unwrap();
        assert_eq!(project.timeline[0].progress, 80.0);
        assert_eq!(project.progress, 80.0);
    }

    #[test]
    fn failed_change_leaves_state_untouched() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let result: Result<()> = repo.commit(|projects| {
            projects.clear();
            Err(AppError::invalid("rejected"))
        });
        assert!(result.is_err());
        assert!(repo.store().document().is_none());
    }

    #[test]
    fn seeding_only_happens_once() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let repo = ProjectRepository::open_seeded(store.clone()).unwrap();
        assert_eq!(repo.projects().len(), 2);

        let again = ProjectRepository::open_seeded(store).unwrap();
        assert_eq!(again.projects().len(), 2);
        assert_eq!(again.projects(), repo.projects());
    }
}
