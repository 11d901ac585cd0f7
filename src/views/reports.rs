//! Per-project and aggregate reports, derived from live project data.
//!
//! There is no expense ledger, so the monthly financial rows spread the
//! budget evenly over the planned months and the amount spent evenly over
//! the months elapsed so far.

use super::Labeled;
use crate::material::MaterialCategory;
use crate::metrics::{self, round2};
use crate::project::Project;
use crate::timeline::Milestone;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// Upper bound on the months a financial table spans.
pub const MAX_REPORT_MONTHS: i32 = 240;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRow {
    /// `YYYY-MM`.
    pub month: String,
    pub planned: f64,
    /// `None` for months that have not started yet.
    pub actual: Option<f64>,
    /// Percentage above (positive) or below plan.
    pub variance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsageRow {
    pub material: String,
    pub category: MaterialCategory,
    pub quantity: f64,
    pub unit: String,
    pub value: f64,
    pub share: Option<f64>,
    pub low_stock: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRow {
    pub phase: String,
    pub end_date: Option<NaiveDate>,
    pub days_late: i64,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub project_id: String,
    pub project_name: String,
    pub completion_rate: f64,
    pub budget: f64,
    pub spent: f64,
    pub budget_utilization: Option<f64>,
    pub elapsed: f64,
    pub schedule_variance: f64,
    pub delayed_tasks: usize,
    pub delays: Vec<DelayRow>,
    pub next_milestone: Labeled<Milestone>,
    pub material_spend: f64,
    pub stock_health: Option<f64>,
    pub financial: Vec<FinancialRow>,
    pub material_usage: Vec<MaterialUsageRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub project_count: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub budget_utilization: Option<f64>,
    pub total_material_spend: f64,
    pub delayed_tasks: usize,
    pub average_completion: f64,
    pub projects: Vec<ProjectReport>,
}

/// Months are numbered from year 0 so they can be subtracted.
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_label(index: i32) -> String {
    format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
}

fn variance(planned: f64, actual: f64) -> Option<f64> {
    (planned > 0.0).then(|| round2((actual - planned) / planned * 100.0))
}

pub fn financial_rows(project: &Project, today: NaiveDate) -> Vec<FinancialRow> {
    let (Some(start), Some(end)) = (project.start_date, project.estimated_end_date) else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }
    let first = month_index(start);
    let months = (month_index(end) - first + 1).min(MAX_REPORT_MONTHS);
    let elapsed = if today < start {
        0
    } else {
        (month_index(today.min(end)) - first + 1).clamp(0, months)
    };

    let planned = round2(project.budget / months as f64);
    let actual = (elapsed > 0).then(|| round2(project.spent / elapsed as f64));
    (0..months)
        .map(|offset| {
            let actual = actual.filter(|_| offset < elapsed);
            FinancialRow {
                month: month_label(first + offset),
                planned,
                actual,
                variance: actual.and_then(|a| variance(planned, a)),
            }
        })
        .collect()
}

pub fn material_usage(project: &Project) -> Vec<MaterialUsageRow> {
    let total = metrics::material_spend(&project.materials);
    project
        .materials
        .iter()
        .map(|m| {
            let value = round2(m.total_value());
            MaterialUsageRow {
                material: m.name.clone(),
                category: m.category,
                quantity: m.quantity,
                unit: m.unit.clone(),
                value,
                share: (total > 0.0).then(|| round2(value / total * 100.0)),
                low_stock: m.is_low_stock(),
            }
        })
        .collect()
}

pub fn delays(project: &Project, today: NaiveDate) -> Vec<DelayRow> {
    metrics::delayed_phases(project, today)
        .map(|phase| DelayRow {
            phase: phase.phase.clone(),
            end_date: phase.end_date,
            days_late: phase.end_date.map(|end| (today - end).num_days()).unwrap_or(0),
            progress: phase.progress,
        })
        .collect()
}

pub fn project_report(project: &Project, now: DateTime<Utc>) -> ProjectReport {
    let today = now.date_naive();
    let delays = delays(project, today);
    ProjectReport {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        completion_rate: project.progress,
        budget: project.budget,
        spent: project.spent,
        budget_utilization: metrics::project_budget_utilization(project),
        elapsed: metrics::elapsed_percentage(project, now),
        schedule_variance: metrics::schedule_variance(project, now),
        delayed_tasks: delays.len(),
        delays,
        next_milestone: super::projects::next_milestone_label(project, today),
        material_spend: metrics::material_spend(&project.materials),
        stock_health: metrics::stock_health(&project.materials),
        financial: financial_rows(project, today),
        material_usage: material_usage(project),
    }
}

pub fn aggregate_report(projects: &[Project], now: DateTime<Utc>) -> AggregateReport {
    let reports: Vec<_> = projects.iter().map(|p| project_report(p, now)).collect();
    let total_budget = round2(projects.iter().map(|p| p.budget).sum());
    let total_spent = round2(projects.iter().map(|p| p.spent).sum());
    let average_completion = if projects.is_empty() {
        0.0
    } else {
        round2(projects.iter().map(|p| p.progress).sum::<f64>() / projects.len() as f64)
    };
    AggregateReport {
        project_count: projects.len(),
        total_budget,
        total_spent,
        budget_utilization: metrics::budget_utilization(total_spent, total_budget),
        total_material_spend: round2(reports.iter().map(|r| r.material_spend).sum()),
        delayed_tasks: reports.iter().map(|r| r.delayed_tasks).sum(),
        average_completion,
        projects: reports,
    }
}
