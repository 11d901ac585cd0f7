use crate::error::{AppError, Result};
use crate::photo::{Photo, PhotoCaption};
use crate::repository::ProjectRepository;
use crate::store::ProjectStore;
use chrono::NaiveDate;

impl<S: ProjectStore> ProjectRepository<S> {
    /// Stores `url` (normally a `data:` URI) as a new photo. A caption
    /// without a date is dated `today`.
    pub fn add_photo(
        &mut self,
        project_id: &str,
        url: String,
        caption: PhotoCaption,
        today: NaiveDate,
    ) -> Result<Photo> {
        let photo = Photo::new(url, caption, today)?;
        let added = photo.clone();
        self.commit_project(project_id, |project| {
            project.photos.push(photo);
            Ok(())
        })?;
        log::info!("Added photo {} to project {}", added.id, project_id);
        Ok(added)
    }

    pub fn remove_photo(&mut self, project_id: &str, photo_id: &str) -> Result<()> {
        self.commit_project(project_id, |project| {
            let index = project
                .photos
                .iter()
                .position(|p| p.id == photo_id)
                .ok_or_else(|| AppError::PhotoNotFound(photo_id.to_string()))?;
            project.photos.remove(index);
            Ok(())
        })
    }
}
