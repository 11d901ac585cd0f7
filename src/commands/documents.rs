use super::dialogs;
use serde::Serialize;
use sitedesk::config::AppState;
use sitedesk::document::{Document, DocumentEdit, DocumentInput};
use sitedesk::error::Result;
use sitedesk::import;
use tauri::{AppHandle, State};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedFile {
    pub file_name: String,
    pub data_uri: String,
}

/// Lets the user choose any file and returns it as a data URI.
#[tauri::command]
pub async fn pick_document_file(app: AppHandle) -> Result<Option<PickedFile>> {
    let Some(path) = dialogs::pick_file(&app, "Documentos", &[]).await? else {
        return Ok(None);
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(PickedFile {
        file_name,
        data_uri: import::read_as_data_uri(&path)?,
    }))
}

#[tauri::command]
pub fn add_document(state: State<'_, AppState>, project_id: String, document: DocumentInput) -> Result<Document> {
    state.with_repo(|repo| repo.add_document(&project_id, document))
}

#[tauri::command]
pub fn update_document(
    state: State<'_, AppState>,
    project_id: String,
    document_id: String,
    document: DocumentEdit,
) -> Result<Document> {
    state.with_repo(|repo| repo.update_document(&project_id, &document_id, document))
}

#[tauri::command]
pub fn remove_document(state: State<'_, AppState>, project_id: String, document_id: String) -> Result<()> {
    state.with_repo(|repo| repo.remove_document(&project_id, &document_id))
}
