use sitedesk::config::AppState;
use sitedesk::error::Result;
use sitedesk::shell::{self, Navigation, ProjectTab, Section};
use tauri::State;

/// Applies `change` to a copy, writes it to the navigation state file and
/// only then swaps it in.
fn update<F>(state: &AppState, change: F) -> Result<Navigation>
where
    F: FnOnce(&mut Navigation) -> Result<()>,
{
    let path = state.config.navigation_path();
    state.with_navigation(|nav| shell::commit_navigation(nav, &path, change))
}

#[tauri::command]
pub fn get_navigation(state: State<'_, AppState>) -> Result<Navigation> {
    state.with_navigation(|nav| Ok(nav.clone()))
}

#[tauri::command]
pub fn select_section(state: State<'_, AppState>, section: Section) -> Result<Navigation> {
    update(&state, |nav| {
        nav.select_section(section);
        Ok(())
    })
}

#[tauri::command]
pub fn select_project(
    state: State<'_, AppState>,
    section: Section,
    project_id: String,
) -> Result<Navigation> {
    let projects = state.with_repo(|repo| Ok(repo.projects().to_vec()))?;
    update(&state, |nav| nav.select_project(&projects, section, &project_id))
}

#[tauri::command]
pub fn show_overview(state: State<'_, AppState>, section: Section) -> Result<Navigation> {
    update(&state, |nav| {
        nav.show_overview(section);
        Ok(())
    })
}

#[tauri::command]
pub fn select_tab(state: State<'_, AppState>, tab: ProjectTab) -> Result<Navigation> {
    update(&state, |nav| nav.select_tab(tab))
}

#[tauri::command]
pub fn clear_navigation(state: State<'_, AppState>) -> Result<Navigation> {
    shell::clear_navigation_state(&state.config.navigation_path())?;
    state.with_navigation(|nav| {
        *nav = Navigation::default();
        Ok(nav.clone())
    })
}
