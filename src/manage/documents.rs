use crate::document::{Document, DocumentCategory, DocumentEdit, DocumentInput};
use crate::error::{AppError, Result};
use crate::project::Project;
use crate::repository::{new_id, ProjectRepository};
use crate::store::ProjectStore;

fn document_mut<'a>(project: &'a mut Project, document_id: &str) -> Result<&'a mut Document> {
    project
        .documents
        .iter_mut()
        .flat_map(|c| c.items.iter_mut())
        .find(|d| d.id == document_id)
        .ok_or_else(|| AppError::DocumentNotFound(document_id.to_string()))
}

impl<S: ProjectStore> ProjectRepository<S> {
    /// Files the document under its type, opening the category if needed.
    pub fn add_document(&mut self, project_id: &str, input: DocumentInput) -> Result<Document> {
        input.validate()?;
        let doc_type = input.doc_type;
        let document = input.into_document(new_id());
        let added = document.clone();
        self.commit_project(project_id, |project| {
            match project.documents.iter_mut().find(|c| c.doc_type == doc_type) {
                Some(category) => category.items.push(document),
                None => project.documents.push(DocumentCategory {
                    doc_type,
                    items: vec![document],
                }),
            }
            Ok(())
        })?;
        log::info!("Added {} document {} to project {}", doc_type, added.name, project_id);
        Ok(added)
    }

    pub fn update_document(
        &mut self,
        project_id: &str,
        document_id: &str,
        edit: DocumentEdit,
    ) -> Result<Document> {
        edit.validate()?;
        self.commit_project(project_id, |project| {
            let document = document_mut(project, document_id)?;
            document.name = edit.name.trim().to_string();
            document.status = edit.status;
            document.expiry_date = edit.expiry_date;
            Ok(document.clone())
        })
    }

    /// Drops the category too once its last document is gone.
    pub fn remove_document(&mut self, project_id: &str, document_id: &str) -> Result<()> {
        self.commit_project(project_id, |project| {
            document_mut(project, document_id)?;
            for category in &mut project.documents {
                category.items.retain(|d| d.id != document_id);
            }
            project.documents.retain(|c| !c.items.is_empty());
            Ok(())
        })
    }
}
