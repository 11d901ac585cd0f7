use sitedesk::config::AppState;
use sitedesk::error::Result;
use sitedesk::metrics;
use sitedesk::views::dashboard::{self, Dashboard};
use sitedesk::views::reports::{self, AggregateReport, ProjectReport};
use tauri::State;

#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> Result<Dashboard> {
    let now = metrics::local_now();
    let days = state.config.upcoming_visit_days;
    state.with_repo(|repo| Ok(dashboard::dashboard(repo.projects(), now, days)))
}

#[tauri::command]
pub fn get_aggregate_report(state: State<'_, AppState>) -> Result<AggregateReport> {
    let now = metrics::local_now();
    state.with_repo(|repo| Ok(reports::aggregate_report(repo.projects(), now)))
}

#[tauri::command]
pub fn get_project_report(state: State<'_, AppState>, project_id: String) -> Result<ProjectReport> {
    let now = metrics::local_now();
    state.with_repo(|repo| Ok(reports::project_report(repo.get(&project_id)?, now)))
}
