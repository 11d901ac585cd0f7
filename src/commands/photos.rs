//! Photo upload goes through an annotation session held in [`AppState`]:
//! pick or open an image, feed pointer events, then save or cancel.

use super::dialogs;
use sitedesk::annotate::{Color, PendingPhoto, PointerEvent, Sketch, Tool};
use sitedesk::config::AppState;
use sitedesk::error::{AppError, Result};
use sitedesk::import;
use sitedesk::metrics;
use sitedesk::photo::{Photo, PhotoCaption};
use tauri::{AppHandle, State};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

fn no_session() -> AppError {
    AppError::invalid("no photo is being annotated")
}

fn start(state: &AppState, image: String) -> Result<Sketch> {
    let pending = PendingPhoto::open(image)?;
    let sketch = pending.sketch().clone();
    state.with_annotation(|slot| {
        *slot = Some(pending);
        Ok(sketch)
    })
}

fn with_sketch<R>(state: &AppState, f: impl FnOnce(&mut Sketch) -> R) -> Result<R> {
    state.with_annotation(|slot| {
        let pending = slot.as_mut().ok_or_else(no_session)?;
        Ok(f(pending.sketch_mut()))
    })
}

/// Opens the image picker and starts annotating the chosen file.
#[tauri::command]
pub async fn pick_photo(app: AppHandle, state: State<'_, AppState>) -> Result<Option<Sketch>> {
    let Some(path) = dialogs::pick_file(&app, "Imagens", IMAGE_EXTENSIONS).await? else {
        return Ok(None);
    };
    let image = import::read_as_data_uri(&path)?;
    start(&state, image).map(Some)
}

#[tauri::command]
pub fn begin_annotation(state: State<'_, AppState>, image: String) -> Result<Sketch> {
    start(&state, image)
}

#[tauri::command]
pub fn annotation_style(
    state: State<'_, AppState>,
    tool: Tool,
    color: Color,
    width: u32,
) -> Result<Sketch> {
    with_sketch(&state, |sketch| {
        sketch.set_tool(tool);
        sketch.set_color(color);
        sketch.set_line_width(width);
        sketch.clone()
    })
}

#[tauri::command]
pub fn annotation_pointer(state: State<'_, AppState>, event: PointerEvent) -> Result<Sketch> {
    with_sketch(&state, |sketch| {
        sketch.apply(event);
        sketch.clone()
    })
}

#[tauri::command]
pub fn annotation_undo(state: State<'_, AppState>) -> Result<Sketch> {
    with_sketch(&state, |sketch| {
        sketch.undo();
        sketch.clone()
    })
}

#[tauri::command]
pub fn annotation_clear(state: State<'_, AppState>) -> Result<Sketch> {
    with_sketch(&state, |sketch| {
        sketch.clear();
        sketch.clone()
    })
}

/// Flattened PNG of the image with the strokes so far.
#[tauri::command]
pub fn annotation_preview(state: State<'_, AppState>) -> Result<String> {
    state.with_annotation(|slot| slot.as_ref().ok_or_else(no_session)?.render())
}

#[tauri::command]
pub fn cancel_annotation(state: State<'_, AppState>) -> Result<()> {
    state.with_annotation(|slot| {
        *slot = None;
        Ok(())
    })
}

/// Flattens the session onto the image and stores it as a new photo.
#[tauri::command]
pub fn save_annotated_photo(
    state: State<'_, AppState>,
    project_id: String,
    caption: PhotoCaption,
) -> Result<Photo> {
    let today = metrics::local_now().date_naive();
    state.save_annotation(&project_id, caption, today)
}

#[tauri::command]
pub fn remove_photo(state: State<'_, AppState>, project_id: String, photo_id: String) -> Result<()> {
    state.with_repo(|repo| repo.remove_photo(&project_id, &photo_id))
}
