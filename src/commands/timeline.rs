use super::dialogs;
use sitedesk::config::AppState;
use sitedesk::error::{AppError, Result};
use sitedesk::timeline::{Milestone, Phase, PhaseDraft, Task};
use tauri::{AppHandle, State};

#[tauri::command]
pub fn add_phase(state: State<'_, AppState>, project_id: String, phase: PhaseDraft) -> Result<Phase> {
    state.with_repo(|repo| repo.add_phase(&project_id, phase))
}

#[tauri::command]
pub fn update_phase(
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
    phase: PhaseDraft,
) -> Result<Phase> {
    state.with_repo(|repo| repo.update_phase(&project_id, phase_index, phase))
}

#[tauri::command]
pub async fn remove_phase(
    app: AppHandle,
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
) -> Result<bool> {
    let name = state.with_repo(|repo| {
        repo.get(&project_id)?
            .timeline
            .get(phase_index)
            .map(|p| p.phase.clone())
            .ok_or_else(|| AppError::PhaseNotFound(format!("#{}", phase_index)))
    })?;
    let confirmation = dialogs::confirm(
        &app,
        "Remover fase",
        format!("Remover a fase \"{}\" com seus marcos e tarefas?", name),
    )
    .await;
    state.with_repo(|repo| repo.remove_phase(&project_id, phase_index, confirmation))
}

#[tauri::command]
pub fn add_milestone(
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
    milestone: Milestone,
) -> Result<Phase> {
    state.with_repo(|repo| repo.add_milestone(&project_id, phase_index, milestone))
}

#[tauri::command]
pub fn remove_milestone(
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
    milestone_index: usize,
) -> Result<Phase> {
    state.with_repo(|repo| repo.remove_milestone(&project_id, phase_index, milestone_index))
}

#[tauri::command]
pub fn add_task(state: State<'_, AppState>, project_id: String, phase_index: usize, task: Task) -> Result<Phase> {
    state.with_repo(|repo| repo.add_task(&project_id, phase_index, task))
}

#[tauri::command]
pub fn update_task(
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
    task_index: usize,
    task: Task,
) -> Result<Phase> {
    state.with_repo(|repo| repo.update_task(&project_id, phase_index, task_index, task))
}

#[tauri::command]
pub fn remove_task(
    state: State<'_, AppState>,
    project_id: String,
    phase_index: usize,
    task_index: usize,
) -> Result<Phase> {
    state.with_repo(|repo| repo.remove_task(&project_id, phase_index, task_index))
}
