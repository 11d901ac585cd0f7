use sitedesk::error::{AppError, Result};
use sitedesk::manage::Confirmation;
use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::oneshot;

/// Asks before a destructive action. A dismissed dialog counts as declined.
pub async fn confirm(app: &AppHandle, title: &str, message: String) -> Confirmation {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .message(message)
        .title(title)
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .show(move |confirmed| {
            let _ = tx.send(confirmed);
        });
    Confirmation::from(rx.await.unwrap_or(false))
}

pub async fn pick_file(app: &AppHandle, filter: &str, extensions: &[&str]) -> Result<Option<PathBuf>> {
    let (tx, rx) = oneshot::channel();
    let mut picker = app.dialog().file();
    if !extensions.is_empty() {
        picker = picker.add_filter(filter, extensions);
    }
    picker.pick_file(move |path| {
        let _ = tx.send(path);
    });
    match rx.await.ok().flatten() {
        Some(path) => path
            .into_path()
            .map(Some)
            .map_err(|e| AppError::invalid(format!("unusable file selection: {}", e))),
        None => Ok(None),
    }
}
