use super::Confirmation;
use crate::error::{AppError, Result};
use crate::project::{Project, ProjectDetails, ProjectStatus};
use crate::repository::ProjectRepository;
use crate::store::ProjectStore;

impl<S: ProjectStore> ProjectRepository<S> {
    pub fn create_project(&mut self, details: ProjectDetails) -> Result<Project> {
        details.validate()?;
        let project = Project::new(details);
        let id = project.id.clone();
        self.commit(|projects| {
            projects.push(project);
            Ok(())
        })?;
        log::info!("Created project {}", id);
        self.get(&id).cloned()
    }

    pub fn update_project(&mut self, project_id: &str, details: ProjectDetails) -> Result<Project> {
        details.validate()?;
        self.commit_project(project_id, |project| {
            project.apply_details(details);
            Ok(())
        })?;
        self.get(project_id).cloned()
    }

    pub fn rename_project(&mut self, project_id: &str, name: &str) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid("project name cannot be empty"));
        }
        self.commit_project(project_id, |project| {
            project.name = name.to_string();
            Ok(())
        })?;
        self.get(project_id).cloned()
    }

    pub fn set_project_status(&mut self, project_id: &str, status: ProjectStatus) -> Result<Project> {
        self.commit_project(project_id, |project| {
            project.status = status;
            Ok(())
        })?;
        self.get(project_id).cloned()
    }

    /// Removes a project together with everything recorded against it.
    /// Returns `false` when the confirmation was declined.
    pub fn delete_project(&mut self, project_id: &str, confirmation: Confirmation) -> Result<bool> {
        self.get(project_id)?;
        if !confirmation.is_confirmed() {
            log::debug!("Deletion of project {} declined", project_id);
            return Ok(false);
        }
        let removed = self.commit(|projects| {
            let index = projects
                .iter()
                .position(|p| p.id == project_id)
                .ok_or_else(|| AppError::ProjectNotFound(project_id.to_string()))?;
            Ok(projects.remove(index))
        })?;
        log::info!(
            "Deleted project {} with {} materials, {} visits, {} phases",
            removed.id,
            removed.materials.len(),
            removed.visits.len(),
            removed.timeline.len()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn details(name: &str) -> ProjectDetails {
        ProjectDetails {
            name: name.into(),
            budget: 250_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn create_persists_immediately() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let project = repo.create_project(details("Loja Centro")).unwrap();
        assert_eq!(project.progress, 0.0);
        assert!(project.timeline.is_empty());

        let reopened = ProjectRepository::open(MemoryStore::with_document(
            repo.store().document().unwrap(),
        ));
        assert_eq!(reopened.get(&project.id).unwrap().name, "Loja Centro");
    }

    #[test]
    fn rename_and_status_are_independent() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let id = repo.create_project(details("Loja Centro")).unwrap().id;
        repo.set_project_status(&id, ProjectStatus::OnHold).unwrap();
        let renamed = repo.rename_project(&id, "  Loja Centro II ").unwrap();
        assert_eq!(renamed.name, "Loja Centro II");
        assert_eq!(renamed.status, ProjectStatus::OnHold);
        assert!(repo.rename_project(&id, "").is_err());
    }

    #[test]
    fn declined_delete_keeps_project() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let id = repo.create_project(details("Galpão")).unwrap().id;
        assert!(!repo.delete_project(&id, Confirmation::Declined).unwrap());
        assert!(repo.find(&id).is_some());
        assert!(repo.delete_project(&id, Confirmation::Confirmed).unwrap());
        assert!(matches!(repo.get(&id), Err(AppError::ProjectNotFound(_))));
    }

    #[test]
    fn delete_unknown_project_fails() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        assert!(repo.delete_project("nope", Confirmation::Confirmed).is_err());
    }
}
