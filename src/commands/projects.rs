use super::dialogs;
use sitedesk::config::AppState;
use sitedesk::error::Result;
use sitedesk::metrics;
use sitedesk::project::{Project, ProjectDetails, ProjectStatus};
use sitedesk::views::projects::{self, ProjectDetail, ProjectSummary};
use tauri::{AppHandle, State};

#[tauri::command]
pub fn list_projects(state: State<'_, AppState>) -> Result<Vec<ProjectSummary>> {
    state.with_repo(|repo| Ok(projects::list(repo.projects())))
}

#[tauri::command]
pub fn get_project(state: State<'_, AppState>, project_id: String) -> Result<ProjectDetail> {
    let now = metrics::local_now();
    state.with_repo(|repo| Ok(projects::detail(repo.get(&project_id)?, now)))
}

#[tauri::command]
pub fn create_project(state: State<'_, AppState>, details: ProjectDetails) -> Result<Project> {
    state.with_repo(|repo| repo.create_project(details))
}

#[tauri::command]
pub fn update_project(
    state: State<'_, AppState>,
    project_id: String,
    details: ProjectDetails,
) -> Result<Project> {
    state.with_repo(|repo| repo.update_project(&project_id, details))
}

#[tauri::command]
pub fn rename_project(state: State<'_, AppState>, project_id: String, name: String) -> Result<Project> {
    state.with_repo(|repo| repo.rename_project(&project_id, &name))
}

#[tauri::command]
pub fn set_project_status(
    state: State<'_, AppState>,
    project_id: String,
    status: ProjectStatus,
) -> Result<Project> {
    state.with_repo(|repo| repo.set_project_status(&project_id, status))
}

/// Prompts first; resolves to `false` when the user backs out.
#[tauri::command]
pub async fn delete_project(
    app: AppHandle,
    state: State<'_, AppState>,
    project_id: String,
) -> Result<bool> {
    let name = state.with_repo(|repo| Ok(repo.get(&project_id)?.name.clone()))?;
    let confirmation = dialogs::confirm(
        &app,
        "Excluir obra",
        format!("Excluir \"{}\" com todos os materiais, visitas, fases, documentos e fotos?", name),
    )
    .await;
    let deleted = state.with_repo(|repo| repo.delete_project(&project_id, confirmation))?;
    if deleted {
        let projects = state.with_repo(|repo| Ok(repo.projects().to_vec()))?;
        state.with_navigation(|nav| {
            nav.retain_existing(&projects);
            Ok(())
        })?;
    }
    Ok(deleted)
}
