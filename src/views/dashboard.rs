use super::materials::{cost_breakdown, low_stock_rows, CategoryCost, LowStockRow};
use super::projects::next_milestone_label;
use super::visits::{upcoming_visits, VisitRow};
use super::Labeled;
use crate::document::{DocumentType, ExpiryState};
use crate::metrics::{self, round2};
use crate::project::{Project, ProjectStatus};
use crate::timeline::Milestone;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Attention {
    DelayedPhases { count: usize },
    BehindSchedule { points: f64 },
    OverBudget { overrun: f64 },
    LowStock { count: usize },
    ExpiringDocuments { count: usize },
}

impl Attention {
    pub fn severity(&self) -> Severity {
        match self {
            Attention::DelayedPhases { .. } | Attention::OverBudget { .. } => Severity::Danger,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringDocumentRow {
    pub project_id: String,
    pub project_name: String,
    pub document_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub expiry_date: Option<NaiveDate>,
    pub expiry: ExpiryState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub progress: f64,
    /// Share of the schedule already elapsed, i.e. where progress should be.
    pub planned: f64,
    pub current_phase: Option<String>,
    pub next_milestone: Labeled<Milestone>,
    pub budget: f64,
    pub spent: f64,
    pub budget_utilization: Option<f64>,
    pub days_remaining: Option<i64>,
    pub cost_breakdown: Vec<CategoryCost>,
    pub attention: Vec<Attention>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub active_projects: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub budget_utilization: Option<f64>,
    pub average_completion: f64,
    pub upcoming_visits: Vec<VisitRow>,
    pub low_stock: Vec<LowStockRow>,
    pub expiring_documents: Vec<ExpiringDocumentRow>,
    pub projects: Vec<ProjectCard>,
}

pub fn expiring_documents(projects: &[Project], today: NaiveDate) -> Vec<ExpiringDocumentRow> {
    let mut rows = Vec::new();
    for project in projects {
        for category in &project.documents {
            for document in &category.items {
                let expiry = document.expiry_state(today);
                if expiry == ExpiryState::Valid {
                    continue;
                }
                rows.push(ExpiringDocumentRow {
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    document_id: document.id.clone(),
                    name: document.name.clone(),
                    doc_type: category.doc_type,
                    expiry_date: document.expiry_date,
                    expiry,
                });
            }
        }
    }
    rows.sort_by_key(|row| row.expiry_date);
    rows
}

fn attention(project: &Project, now: DateTime<Utc>) -> Vec<Attention> {
    let today = now.date_naive();
    let mut items = Vec::new();

    let delayed = metrics::delayed_task_count(project, today);
    if delayed > 0 {
        items.push(Attention::DelayedPhases { count: delayed });
    }
    let variance = metrics::schedule_variance(project, now);
    if variance < 0.0 {
        items.push(Attention::BehindSchedule { points: -variance });
    }
    if project.budget > 0.0 && project.spent > project.budget {
        items.push(Attention::OverBudget {
            overrun: round2(project.spent - project.budget),
        });
    }
    let low = metrics::low_stock(&project.materials).count();
    if low > 0 {
        items.push(Attention::LowStock { count: low });
    }
    let expiring = project
        .documents
        .iter()
        .flat_map(|c| c.items.iter())
        .filter(|d| d.expiry_state(today) != ExpiryState::Valid)
        .count();
    if expiring > 0 {
        items.push(Attention::ExpiringDocuments { count: expiring });
    }
    items
}

pub fn project_card(project: &Project, now: DateTime<Utc>) -> ProjectCard {
    let today = now.date_naive();
    ProjectCard {
        id: project.id.clone(),
        name: project.name.clone(),
        status: project.status,
        progress: project.progress,
        planned: metrics::elapsed_percentage(project, now),
        current_phase: metrics::current_phase(project, today).map(|p| p.phase.clone()),
        next_milestone: next_milestone_label(project, today),
        budget: project.budget,
        spent: project.spent,
        budget_utilization: metrics::project_budget_utilization(project),
        days_remaining: metrics::days_remaining(project, today),
        cost_breakdown: cost_breakdown(&project.materials),
        attention: attention(project, now),
    }
}

pub fn dashboard(projects: &[Project], now: DateTime<Utc>, upcoming_days: i64) -> Dashboard {
    let today = now.date_naive();
    let total_budget = round2(projects.iter().map(|p| p.budget).sum());
    let total_spent = round2(projects.iter().map(|p| p.spent).sum());
    let average_completion = if projects.is_empty() {
        0.0
    } else {
        round2(projects.iter().map(|p| p.progress).sum::<f64>() / projects.len() as f64)
    };
    Dashboard {
        active_projects: projects.iter().filter(|p| p.status.is_active()).count(),
        total_budget,
        total_spent,
        budget_utilization: metrics::budget_utilization(total_spent, total_budget),
        average_completion,
        upcoming_visits: upcoming_visits(projects, now.naive_utc(), upcoming_days),
        low_stock: low_stock_rows(projects),
        expiring_documents: expiring_documents(projects, today),
        projects: projects.iter().map(|p| project_card(p, now)).collect(),
    }
}
