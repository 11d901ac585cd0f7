use sitedesk::config::AppState;
use sitedesk::error::Result;
use sitedesk::material::{Material, MaterialInput};
use sitedesk::views::materials::{self, MaterialsOverview, ProjectMaterials};
use tauri::State;

#[tauri::command]
pub fn get_materials_overview(state: State<'_, AppState>) -> Result<MaterialsOverview> {
    state.with_repo(|repo| Ok(materials::overview(repo.projects())))
}

#[tauri::command]
pub fn get_project_materials(state: State<'_, AppState>, project_id: String) -> Result<ProjectMaterials> {
    state.with_repo(|repo| Ok(materials::project_materials(repo.get(&project_id)?)))
}

#[tauri::command]
pub fn add_material(
    state: State<'_, AppState>,
    project_id: String,
    material: MaterialInput,
) -> Result<Material> {
    state.with_repo(|repo| repo.add_material(&project_id, material))
}

#[tauri::command]
pub fn update_material(
    state: State<'_, AppState>,
    project_id: String,
    material_id: String,
    material: MaterialInput,
) -> Result<Material> {
    state.with_repo(|repo| repo.update_material(&project_id, &material_id, material))
}

#[tauri::command]
pub fn delete_material(state: State<'_, AppState>, project_id: String, material_id: String) -> Result<()> {
    state.with_repo(|repo| repo.delete_material(&project_id, &material_id))
}

#[tauri::command]
pub fn set_materials_budget(
    state: State<'_, AppState>,
    project_id: String,
    budget: Option<f64>,
) -> Result<()> {
    state.with_repo(|repo| repo.set_materials_budget(&project_id, budget))
}
