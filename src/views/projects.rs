use super::Labeled;
use crate::document::{Document, DocumentType, ExpiryState};
use crate::metrics;
use crate::project::{ConstructionType, Project, ProjectStatus};
use crate::timeline::{Milestone, Phase};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: ProjectStatus,
    pub construction_type: ConstructionType,
    pub start_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub progress: f64,
    pub budget: f64,
    pub spent: f64,
    pub budget_utilization: Option<f64>,
    pub responsible_engineer: String,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            address: project.address.clone(),
            status: project.status,
            construction_type: project.construction_type,
            start_date: project.start_date,
            estimated_end_date: project.estimated_end_date,
            progress: project.progress,
            budget: project.budget,
            spent: project.spent,
            budget_utilization: metrics::project_budget_utilization(project),
            responsible_engineer: project.responsible_engineer.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRow {
    #[serde(flatten)]
    pub phase: Phase,
    pub delayed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub expiry: ExpiryState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGroup {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub items: Vec<DocumentRow>,
}

/// Everything the project detail tabs render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub project: Project,
    pub elapsed: f64,
    pub schedule_variance: f64,
    pub budget_utilization: Option<f64>,
    pub days_remaining: Option<i64>,
    pub delayed_phase_count: usize,
    pub current_phase: Option<String>,
    pub next_milestone: Labeled<Milestone>,
    pub timeline: Vec<PhaseRow>,
    pub documents: Vec<DocumentGroup>,
}

pub fn list(projects: &[Project]) -> Vec<ProjectSummary> {
    projects.iter().map(ProjectSummary::from).collect()
}

pub fn next_milestone_label(project: &Project, today: NaiveDate) -> Labeled<Milestone> {
    Labeled::new(metrics::next_milestone(project, today).cloned(), |m| {
        match m.date {
            Some(date) => format!("{} ({})", m.description, date.format("%d/%m/%Y")),
            None => m.description.clone(),
        }
    })
}

pub fn detail(project: &Project, now: DateTime<Utc>) -> ProjectDetail {
    let today = now.date_naive();
    let current = metrics::current_phase_index(project, today);
    let timeline = project
        .timeline
        .iter()
        .enumerate()
        .map(|(index, phase)| PhaseRow {
            delayed: metrics::is_phase_delayed(phase, today),
            current: current == Some(index),
            phase: phase.clone(),
        })
        .collect();
    let documents = project
        .documents
        .iter()
        .map(|category| DocumentGroup {
            doc_type: category.doc_type,
            items: category
                .items
                .iter()
                .map(|d| DocumentRow {
                    expiry: d.expiry_state(today),
                    document: d.clone(),
                })
                .collect(),
        })
        .collect();

    ProjectDetail {
        elapsed: metrics::elapsed_percentage(project, now),
        schedule_variance: metrics::schedule_variance(project, now),
        budget_utilization: metrics::project_budget_utilization(project),
        days_remaining: metrics::days_remaining(project, today),
        delayed_phase_count: metrics::delayed_task_count(project, today),
        current_phase: current.map(|index| project.timeline[index].phase.clone()),
        next_milestone: next_milestone_label(project, today),
        timeline,
        documents,
        project: project.clone(),
    }
}
