use crate::error::{AppError, Result};
use crate::repository::{new_id, ProjectRepository};
use crate::store::ProjectStore;
use crate::visit::{Visit, VisitInput};

impl<S: ProjectStore> ProjectRepository<S> {
    pub fn schedule_visit(&mut self, project_id: &str, input: VisitInput) -> Result<Visit> {
        input.validate()?;
        let visit = input.into_visit(new_id());
        let scheduled = visit.clone();
        self.commit_project(project_id, |project| {
            project.visits.push(visit);
            Ok(())
        })?;
        log::info!(
            "Scheduled visit {} for project {} on {:?} {}",
            scheduled.id,
            project_id,
            scheduled.date,
            scheduled.time
        );
        Ok(scheduled)
    }

    /// Visit ids are unique across projects, so the owner is looked up.
    pub fn delete_visit(&mut self, visit_id: &str) -> Result<()> {
        self.commit(|projects| {
            for project in projects.iter_mut() {
                if let Some(index) = project.visits.iter().position(|v| v.id == visit_id) {
                    project.visits.remove(index);
                    return Ok(());
                }
            }
            Err(AppError::VisitNotFound(visit_id.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDetails;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn measurement() -> VisitInput {
        VisitInput {
            date: NaiveDate::from_ymd_opt(2024, 3, 28),
            time: "09:00".into(),
            purpose: "Medição Mensal".into(),
            participants: "Carlos Oliveira".into(),
            location: "Obra completa".into(),
            observations: String::new(),
        }
    }

    #[test]
    fn schedule_and_delete_across_projects() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let a = repo
            .create_project(ProjectDetails { name: "A".into(), ..Default::default() })
            .unwrap()
            .id;
        let b = repo
            .create_project(ProjectDetails { name: "B".into(), ..Default::default() })
            .unwrap()
            .id;
        repo.schedule_visit(&a, measurement()).unwrap();
        let visit = repo.schedule_visit(&b, measurement()).unwrap();

        repo.delete_visit(&visit.id).unwrap();
        assert_eq!(repo.get(&a).unwrap().visits.len(), 1);
        assert!(repo.get(&b).unwrap().visits.is_empty());
        assert!(matches!(
            repo.delete_visit(&visit.id),
            Err(AppError::VisitNotFound(_))
        ));
    }

    #[test]
    fn incomplete_visit_is_rejected() {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let id = repo
            .create_project(ProjectDetails { name: "A".into(), ..Default::default() })
            .unwrap()
            .id;
        let mut input = measurement();
        input.participants.clear();
        assert!(repo.schedule_visit(&id, input).is_err());
        assert!(repo.get(&id).unwrap().visits.is_empty());
    }
}
