//! Phases are addressed by their position in the timeline, milestones and
//! tasks by their position in the phase.

use super::Confirmation;
use crate::error::{AppError, Result};
use crate::project::Project;
use crate::repository::ProjectRepository;
use crate::store::ProjectStore;
use crate::timeline::{Milestone, Phase, PhaseDraft, Task};

fn phase_mut(project: &mut Project, index: usize) -> Result<&mut Phase> {
    project
        .timeline
        .get_mut(index)
        .ok_or_else(|| AppError::PhaseNotFound(format!("#{} in project {}", index, project.id)))
}

fn out_of_range(what: &str, index: usize, phase: &Phase) -> AppError {
    AppError::invalid(format!("no {} #{} in phase {}", what, index, phase.phase))
}

impl<S: ProjectStore> ProjectRepository<S> {
    fn phase_at(&self, project_id: &str, index: usize) -> Result<Phase> {
        self.get(project_id)?
            .timeline
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::PhaseNotFound(format!("#{} in project {}", index, project_id)))
    }

    pub fn add_phase(&mut self, project_id: &str, draft: PhaseDraft) -> Result<Phase> {
        draft.validate()?;
        let index = self.commit_project(project_id, |project| {
            project.timeline.push(draft.into_phase());
            Ok(project.timeline.len() - 1)
        })?;
        self.phase_at(project_id, index)
    }

    /// Replaces name, dates, milestones and tasks of a phase.
    pub fn update_phase(&mut self, project_id: &str, index: usize, draft: PhaseDraft) -> Result<Phase> {
        draft.validate()?;
        self.commit_project(project_id, |project| {
            *phase_mut(project, index)? = draft.into_phase();
            Ok(())
        })?;
        self.phase_at(project_id, index)
    }

    /// Returns `false` when the confirmation was declined.
    pub fn remove_phase(
        &mut self,
        project_id: &str,
        index: usize,
        confirmation: Confirmation,
    ) -> Result<bool> {
        self.phase_at(project_id, index)?;
        if !confirmation.is_confirmed() {
            return Ok(false);
        }
        let removed = self.commit_project(project_id, |project| {
            phase_mut(project, index)?;
            Ok(project.timeline.remove(index))
        })?;
        log::info!("Removed phase {} from project {}", removed.phase, project_id);
        Ok(true)
    }

    pub fn add_milestone(&mut self, project_id: &str, phase: usize, milestone: Milestone) -> Result<Phase> {
        milestone.validate()?;
        self.commit_project(project_id, |project| {
            phase_mut(project, phase)?.milestones.push(milestone);
            Ok(())
        })?;
        self.phase_at(project_id, phase)
    }

    pub fn remove_milestone(&mut self, project_id: &str, phase: usize, milestone: usize) -> Result<Phase> {
        self.commit_project(project_id, |project| {
            let target = phase_mut(project, phase)?;
            if milestone >= target.milestones.len() {
                return Err(out_of_range("milestone", milestone, target));
            }
            target.milestones.remove(milestone);
            Ok(())
        })?;
        self.phase_at(project_id, phase)
    }

    pub fn add_task(&mut self, project_id: &str, phase: usize, task: Task) -> Result<Phase> {
        task.validate()?;
        self.commit_project(project_id, |project| {
            phase_mut(project, phase)?.tasks.push(task);
            Ok(())
        })?;
        self.phase_at(project_id, phase)
    }

    /// Progress of the phase and the project follow on commit.
    pub fn update_task(
        &mut self,
        project_id: &str,
        phase: usize,
        task: usize,
        update: Task,
    ) -> Result<Phase> {
        update.validate()?;
        self.commit_project(project_id, |project| {
            let target = phase_mut(project, phase)?;
            match target.tasks.get_mut(task) {
                Some(slot) => {
                    *slot = update;
                    Ok(())
                }
                None => Err(out_of_range("task", task, target)),
            }
        })?;
        self.phase_at(project_id, phase)
    }

    pub fn remove_task(&mut self, project_id: &str, phase: usize, task: usize) -> Result<Phase> {
        self.commit_project(project_id, |project| {
            let target = phase_mut(project, phase)?;
            if task >= target.tasks.len() {
                return Err(out_of_range("task", task, target));
            }
            target.tasks.remove(task);
            Ok(())
        })?;
        self.phase_at(project_id, phase)
    }
}
