use crate::metrics;
use crate::project::Project;
use crate::visit::Visit;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// A visit annotated with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRow {
    pub project_id: String,
    pub project_name: String,
    #[serde(flatten)]
    pub visit: Visit,
}

impl VisitRow {
    fn new(project: &Project, visit: &Visit) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            visit: visit.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVisits {
    pub project_id: String,
    pub project_name: String,
    pub visits: Vec<Visit>,
    pub next_visit: Option<Visit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitsOverview {
    pub visits: Vec<VisitRow>,
    pub next_visit: Option<VisitRow>,
    pub upcoming: Vec<VisitRow>,
}

/// Undated visits sort last.
fn sort_key(visit: &Visit) -> (bool, Option<NaiveDateTime>) {
    let at = visit.scheduled_at();
    (at.is_none(), at)
}

/// Every visit across all projects, in date and time order.
pub fn all_visits(projects: &[Project]) -> Vec<VisitRow> {
    let mut rows: Vec<VisitRow> = projects
        .iter()
        .flat_map(|p| p.visits.iter().map(move |v| VisitRow::new(p, v)))
        .collect();
    rows.sort_by_key(|row| sort_key(&row.visit));
    rows
}

/// Visits from `now` up to `days` days ahead.
pub fn upcoming_visits(projects: &[Project], now: NaiveDateTime, days: i64) -> Vec<VisitRow> {
    let horizon = now + Duration::days(days);
    all_visits(projects)
        .into_iter()
        .filter(|row| {
            row.visit
                .scheduled_at()
                .is_some_and(|at| at >= now && at <= horizon)
        })
        .collect()
}

pub fn overview(projects: &[Project], now: NaiveDateTime, upcoming_days: i64) -> VisitsOverview {
    let visits = all_visits(projects);
    let next_visit = visits
        .iter()
        .find(|row| row.visit.scheduled_at().is_some_and(|at| at >= now))
        .cloned();
    VisitsOverview {
        upcoming: upcoming_visits(projects, now, upcoming_days),
        next_visit,
        visits,
    }
}

pub fn project_visits(project: &Project, now: NaiveDateTime) -> ProjectVisits {
    let mut visits = project.visits.clone();
    visits.sort_by_key(sort_key);
    ProjectVisits {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        next_visit: metrics::next_visit(&project.visits, now).cloned(),
        visits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::example_projects;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn flattened_visits_are_sorted_and_labelled() {
        let rows = all_visits(&example_projects());
        let purposes: Vec<_> = rows.iter().map(|r| r.visit.purpose.as_str()).collect();
        assert_eq!(
            purposes,
            ["Vistoria Estrutural", "Inspeção de Qualidade", "Medição Mensal"]
        );
        assert_eq!(rows[1].project_name, "Residencial Parque Verde");
    }

    #[test]
    fn upcoming_window_is_inclusive() {
        let projects = example_projects();
        let rows = upcoming_visits(&projects, at(2024, 3, 25, 14), 2);
        assert_eq!(rows.len(), 2);
        let rows = upcoming_visits(&projects, at(2024, 3, 25, 15), 7);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].visit.purpose, "Inspeção de Qualidade");
    }

    #[test]
    fn next_visit_skips_past_ones() {
        let projects = example_projects();
        let overview = overview(&projects, at(2024, 3, 27, 0), 7);
        let next = overview.next_visit.unwrap();
        assert_eq!(next.visit.purpose, "Medição Mensal");

        let horizonte = project_visits(&projects[0], at(2024, 3, 29, 0));
        assert!(horizonte.next_visit.is_none());
        assert_eq!(horizonte.visits.len(), 2);
    }

    #[test]
    fn row_serializes_flat() {
        let rows = all_visits(&example_projects());
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["projectName"], "Edifício Horizonte");
        assert_eq!(json["purpose"], "Vistoria Estrutural");
        assert_eq!(json["date"], "2024-03-25");
    }
}
