use crate::material::{Material, MaterialCategory};
use crate::metrics::{self, round2};
use crate::project::Project;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRow {
    #[serde(flatten)]
    pub material: Material,
    pub total_value: f64,
    pub low_stock: bool,
}

impl From<&Material> for MaterialRow {
    fn from(material: &Material) -> Self {
        Self {
            material: material.clone(),
            total_value: round2(material.total_value()),
            low_stock: material.is_low_stock(),
        }
    }
}

/// A low-stock material and the project holding it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockRow {
    pub project_id: String,
    pub project_name: String,
    pub material_id: String,
    pub name: String,
    pub quantity: f64,
    pub min_quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCost {
    pub category: MaterialCategory,
    pub value: f64,
    /// Share of the project's material spend, `None` when nothing was spent.
    pub share: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMaterials {
    pub project_id: String,
    pub project_name: String,
    pub materials: Vec<MaterialRow>,
    pub total_spend: f64,
    pub materials_budget: Option<f64>,
    pub remaining_budget: Option<f64>,
    pub budget_utilization: Option<f64>,
    pub low_stock_count: usize,
    pub stock_health: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsOverview {
    pub total_spend: f64,
    /// Sum of the materials budgets that are set.
    pub available_budget: f64,
    pub material_count: usize,
    pub low_stock: Vec<LowStockRow>,
    pub projects: Vec<ProjectMaterials>,
}

pub fn low_stock_rows(projects: &[Project]) -> Vec<LowStockRow> {
    projects
        .iter()
        .flat_map(|project| {
            metrics::low_stock(&project.materials).map(move |m| LowStockRow {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                material_id: m.id.clone(),
                name: m.name.clone(),
                quantity: m.quantity,
                min_quantity: m.min_quantity,
                unit: m.unit.clone(),
            })
        })
        .collect()
}

/// Spend per category, in category order, skipping empty categories.
pub fn cost_breakdown(materials: &[Material]) -> Vec<CategoryCost> {
    let total = metrics::material_spend(materials);
    MaterialCategory::ALL
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<_> = materials.iter().filter(|m| m.category == category).collect();
            if in_category.is_empty() {
                return None;
            }
            let value = round2(in_category.iter().map(|m| m.total_value()).sum());
            let share = (total > 0.0).then(|| round2(value / total * 100.0));
            Some(CategoryCost { category, value, share })
        })
        .collect()
}

pub fn project_materials(project: &Project) -> ProjectMaterials {
    let total_spend = metrics::material_spend(&project.materials);
    let budget = project.materials_budget;
    ProjectMaterials {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        materials: project.materials.iter().map(MaterialRow::from).collect(),
        total_spend,
        materials_budget: budget,
        remaining_budget: budget.map(|b| round2(b - total_spend)),
        budget_utilization: budget.and_then(|b| metrics::budget_utilization(total_spend, b)),
        low_stock_count: metrics::low_stock(&project.materials).count(),
        stock_health: metrics::stock_health(&project.materials),
    }
}

pub fn overview(projects: &[Project]) -> MaterialsOverview {
    let per_project: Vec<_> = projects.iter().map(project_materials).collect();
    MaterialsOverview {
        total_spend: round2(per_project.iter().map(|p| p.total_spend).sum()),
        available_budget: round2(per_project.iter().filter_map(|p| p.materials_budget).sum()),
        material_count: projects.iter().map(|p| p.materials.len()).sum(),
        low_stock: low_stock_rows(projects),
        projects: per_project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::example_projects;

    #[test]
    fn aggregate_sums_across_projects() {
        let overview = overview(&example_projects());
        // 2500 + 2250 for Horizonte, 2500 + 3600 for Parque Verde
        assert_eq!(overview.total_spend, 10_850.0);
        assert_eq!(overview.available_budget, 350_000.0);
        assert_eq!(overview.material_count, 4);
        assert!(overview.low_stock.is_empty());
    }

    #[test]
    fn project_figures_follow_budget() {
        let mut project = example_projects().remove(0);
        project.materials[0].quantity = 20.0;
        let view = project_materials(&project);
        assert_eq!(view.total_spend, 2750.0);
        assert_eq!(view.remaining_budget, Some(197_250.0));
        assert_eq!(view.low_stock_count, 1);
        assert_eq!(view.stock_health, Some(50.0));
        assert!(view.materials[0].low_stock);

        project.materials_budget = None;
        let view = project_materials(&project);
        assert_eq!(view.remaining_budget, None);
        assert_eq!(view.budget_utilization, None);
    }

    #[test]
    fn low_stock_rows_name_their_project() {
        let mut projects = example_projects();
        projects[1].materials[1].quantity = 5.0;
        let rows = low_stock_rows(&projects);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_name, "Residencial Parque Verde");
        assert_eq!(rows[0].name, "Areia");
    }

    #[test]
    fn breakdown_shares_add_up() {
        let project = example_projects().remove(1);
        let breakdown = cost_breakdown(&project.materials);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, MaterialCategory::Basic);
        assert_eq!(breakdown[0].value, 3600.0);
        let total: f64 = breakdown.iter().filter_map(|c| c.share).sum();
        assert!((total - 100.0).abs() < 0.02);
        assert!(cost_breakdown(&[]).is_empty());
    }
}
