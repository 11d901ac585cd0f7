use crate::document::DocumentCategory;
use crate::error::{AppError, Result};
use crate::lenient::{self, string_enum};
use crate::material::Material;
use crate::photo::Photo;
use crate::timeline::Phase;
use crate::visit::Visit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum ProjectStatus {
        Planning => "planning",
        InProgress => "in_progress",
        OnHold => "on_hold",
        Completed => "completed",
    }
    default Planning
}

string_enum! {
    pub enum ConstructionType {
        Residential => "residential",
        Commercial => "commercial",
        Industrial => "industrial",
        Mixed => "mixed",
    }
    default Residential
}

impl ProjectStatus {
    /// Anything not finished counts as an active site.
    pub fn is_active(&self) -> bool {
        !matches!(self, ProjectStatus::Completed)
    }
}

/// A construction site and everything recorded against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub estimated_end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub budget: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub spent: f64,
    /// Mean of the timeline's phase progress; never set directly.
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub construction_type: ConstructionType,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_area: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub number_of_units: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub responsible_engineer: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub materials_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub materials: Vec<Material>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub photos: Vec<Photo>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub timeline: Vec<Phase>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub documents: Vec<DocumentCategory>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub visits: Vec<Visit>,
}

/// Editable scalar fields of a project, as submitted by the project form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub estimated_end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub budget: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub spent: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub construction_type: ConstructionType,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_area: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub number_of_units: u32,
    #[serde(default)]
    pub responsible_engineer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub materials_budget: Option<f64>,
}

impl ProjectDetails {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("project name cannot be empty"));
        }
        if self.budget < 0.0 || self.spent < 0.0 || self.total_area < 0.0 {
            return Err(AppError::invalid("amounts cannot be negative"));
        }
        if let Some(materials_budget) = self.materials_budget {
            if materials_budget < 0.0 {
                return Err(AppError::invalid("materials budget cannot be negative"));
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.estimated_end_date) {
            if end < start {
                return Err(AppError::invalid(format!(
                    "estimated end {} is before start {}",
                    end, start
                )));
            }
        }
        Ok(())
    }
}

impl Project {
    /// Builds a fresh project with empty collections and no progress yet.
    pub fn new(details: ProjectDetails) -> Self {
        let mut project = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            address: String::new(),
            start_date: None,
            estimated_end_date: None,
            budget: 0.0,
            spent: 0.0,
            progress: 0.0,
            status: ProjectStatus::default(),
            construction_type: ConstructionType::default(),
            total_area: 0.0,
            number_of_units: 0,
            responsible_engineer: String::new(),
            description: String::new(),
            materials_budget: None,
            materials: Vec::new(),
            photos: Vec::new(),
            timeline: Vec::new(),
            documents: Vec::new(),
            visits: Vec::new(),
        };
        project.apply_details(details);
        project
    }

    pub fn apply_details(&mut self, details: ProjectDetails) {
        self.name = details.name.trim().to_string();
        self.address = details.address;
        self.start_date = details.start_date;
        self.estimated_end_date = details.estimated_end_date;
        self.budget = details.budget;
        self.spent = details.spent;
        self.status = details.status;
        self.construction_type = details.construction_type;
        self.total_area = details.total_area;
        self.number_of_units = details.number_of_units;
        self.responsible_engineer = details.responsible_engineer;
        self.description = details.description;
        self.materials_budget = details.materials_budget;
    }

    pub fn details(&self) -> ProjectDetails {
        ProjectDetails {
            name: self.name.clone(),
            address: self.address.clone(),
            start_date: self.start_date,
            estimated_end_date: self.estimated_end_date,
            budget: self.budget,
            spent: self.spent,
            status: self.status,
            construction_type: self.construction_type,
            total_area: self.total_area,
            number_of_units: self.number_of_units,
            responsible_engineer: self.responsible_engineer.clone(),
            description: self.description.clone(),
            materials_budget: self.materials_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_project_decodes_with_defaults() {
        let json = r#"{
            "id": 1,
            "name": "Edifício Horizonte",
            "startDate": "2024-01-15",
            "estimatedEndDate": "",
            "budget": "1500000",
            "status": "in_progress",
            "constructionType": "",
            "totalArea": "5000",
            "numberOfUnits": "24"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "1");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.construction_type, ConstructionType::Residential);
        assert_eq!(project.estimated_end_date, None);
        assert_eq!(project.total_area, 5000.0);
        assert_eq!(project.number_of_units, 24);
        assert!(project.materials.is_empty());
        assert!(project.visits.is_empty());
    }

    #[test]
    fn serializes_camel_case_labels() {
        let project = Project::new(ProjectDetails {
            name: "Galpão Norte".into(),
            status: ProjectStatus::OnHold,
            construction_type: ConstructionType::Industrial,
            ..Default::default()
        });
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["status"], "on_hold");
        assert_eq!(value["constructionType"], "industrial");
        assert!(value.get("estimatedEndDate").is_some());
        assert!(value.get("materialsBudget").is_none());
    }

    #[test]
    fn details_reject_inverted_dates() {
        let details = ProjectDetails {
            name: "Obra".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            estimated_end_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..Default::default()
        };
        assert!(matches!(details.validate(), Err(AppError::InvalidData(_))));
    }

    #[test]
    fn status_parses_from_label() {
        assert_eq!("completed".parse::<ProjectStatus>().unwrap(), ProjectStatus::Completed);
        assert!("finished".parse::<ProjectStatus>().is_err());
        assert!(!ProjectStatus::Completed.is_active());
    }
}
