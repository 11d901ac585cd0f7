use sitedesk::config::AppState;
use sitedesk::error::Result;
use sitedesk::metrics;
use sitedesk::views::visits::{self, ProjectVisits, VisitsOverview};
use sitedesk::visit::{Visit, VisitInput};
use tauri::State;

#[tauri::command]
pub fn get_visits_overview(state: State<'_, AppState>) -> Result<VisitsOverview> {
    let now = metrics::local_now().naive_utc();
    let days = state.config.upcoming_visit_days;
    state.with_repo(|repo| Ok(visits::overview(repo.projects(), now, days)))
}

#[tauri::command]
pub fn get_project_visits(state: State<'_, AppState>, project_id: String) -> Result<ProjectVisits> {
    let now = metrics::local_now().naive_utc();
    state.with_repo(|repo| Ok(visits::project_visits(repo.get(&project_id)?, now)))
}

#[tauri::command]
pub fn schedule_visit(state: State<'_, AppState>, project_id: String, visit: VisitInput) -> Result<Visit> {
    state.with_repo(|repo| repo.schedule_visit(&project_id, visit))
}

#[tauri::command]
pub fn delete_visit(state: State<'_, AppState>, visit_id: String) -> Result<()> {
    state.with_repo(|repo| repo.delete_visit(&visit_id))
}
