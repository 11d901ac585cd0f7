use crate::error::{AppError, Result};
use crate::material::{Material, MaterialInput};
use crate::repository::{new_id, ProjectRepository};
use crate::store::ProjectStore;

impl<S: ProjectStore> ProjectRepository<S> {
    pub fn add_material(&mut self, project_id: &str, input: MaterialInput) -> Result<Material> {
        input.validate()?;
        let material = input.into_material(new_id());
        let added = material.clone();
        self.commit_project(project_id, |project| {
            project.materials.push(material);
            Ok(())
        })?;
        log::info!("Added material {} to project {}", added.name, project_id);
        Ok(added)
    }

    pub fn update_material(
        &mut self,
        project_id: &str,
        material_id: &str,
        input: MaterialInput,
    ) -> Result<Material> {
        input.validate()?;
        self.commit_project(project_id, |project| {
            let slot = project
                .materials
                .iter_mut()
                .find(|m| m.id == material_id)
                .ok_or_else(|| AppError::MaterialNotFound(material_id.to_string()))?;
            *slot = input.into_material(material_id.to_string());
            Ok(slot.clone())
        })
    }

    pub fn delete_material(&mut self, project_id: &str, material_id: &str) -> Result<()> {
        self.commit_project(project_id, |project| {
            let before = project.materials.len();
            project.materials.retain(|m| m.id != material_id);
            if project.materials.len() == before {
                return Err(AppError::MaterialNotFound(material_id.to_string()));
            }
            Ok(())
        })
    }

    /// `None` clears the budget.
    pub fn set_materials_budget(&mut self, project_id: &str, budget: Option<f64>) -> Result<()> {
        if let Some(amount) = budget {
            if !amount.is_finite() || amount < 0.0 {
                return Err(AppError::invalid("materials budget cannot be negative"));
            }
        }
        self.commit_project(project_id, |project| {
            project.materials_budget = budget;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialCategory;
    use crate::project::ProjectDetails;
    use crate::store::MemoryStore;

    fn repo_with_project() -> (ProjectRepository<MemoryStore>, String) {
        let mut repo = ProjectRepository::open(MemoryStore::new());
        let id = repo
            .create_project(ProjectDetails {
                name: "Edifício Horizonte".into(),
                ..Default::default()
            })
            .unwrap()
            .id;
        (repo, id)
    }

    fn sand() -> MaterialInput {
        MaterialInput {
            name: "Areia".into(),
            quantity: 30.0,
            unit: "m³".into(),
            unit_price: 120.0,
            min_quantity: Some(5.0),
            supplier: None,
            category: MaterialCategory::Basic,
        }
    }

    #[test]
    fn add_update_delete_material() {
        let (mut repo, project_id) = repo_with_project();
        let added = repo.add_material(&project_id, sand()).unwrap();
        assert_eq!(added.supplier, "");

        let mut edit = sand();
        edit.quantity = 4.0;
        let updated = repo.update_material(&project_id, &added.id, edit).unwrap();
        assert_eq!(updated.id, added.id);
        assert!(updated.is_low_stock());

        repo.delete_material(&project_id, &added.id).unwrap();
        assert!(repo.get(&project_id).unwrap().materials.is_empty());
        assert!(matches!(
            repo.delete_material(&project_id, &added.id),
            Err(AppError::MaterialNotFound(_))
        ));
    }

    #[test]
    fn invalid_material_is_not_stored() {
        let (mut repo, project_id) = repo_with_project();
        let mut input = sand();
        input.unit_price = -3.0;
        assert!(repo.add_material(&project_id, input).is_err());
        assert!(repo.get(&project_id).unwrap().materials.is_empty());
    }

    #[test]
    fn materials_budget_can_be_cleared() {
        let (mut repo, project_id) = repo_with_project();
        repo.set_materials_budget(&project_id, Some(200_000.0)).unwrap();
        assert_eq!(repo.get(&project_id).unwrap().materials_budget, Some(200_000.0));
        assert!(repo.set_materials_budget(&project_id, Some(-1.0)).is_err());
        repo.set_materials_budget(&project_id, None).unwrap();
        assert_eq!(repo.get(&project_id).unwrap().materials_budget, None);
    }
}
