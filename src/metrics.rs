//! Derived project figures. Everything here is a pure function of the
//! project data and an explicit clock, recomputed on demand.

use crate::material::Material;
use crate::project::Project;
use crate::timeline::{Milestone, Phase};
use crate::visit::Visit;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Local wall-clock time. Stored dates carry no zone, so every comparison is
/// made in the user's calendar; the `Utc` tag is nominal.
pub fn local_now() -> DateTime<Utc> {
    chrono::Local::now().naive_local().and_utc()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean task progress, two decimals; 0 for a phase without tasks.
pub fn phase_progress(phase: &Phase) -> f64 {
    round2(mean(phase.tasks.iter().map(|t| t.progress)))
}

/// Mean phase progress, two decimals; 0 for an empty timeline.
pub fn overall_progress(timeline: &[Phase]) -> f64 {
    round2(mean(timeline.iter().map(|p| p.progress)))
}

/// Refreshes every phase's progress and then the project's.
pub fn recompute_progress(project: &mut Project) {
    for phase in &mut project.timeline {
        for task in &mut phase.tasks {
            task.progress = clamp_percent(task.progress);
        }
        phase.progress = phase_progress(phase);
    }
    project.progress = overall_progress(&project.timeline);
}

/// Share of the planned duration that has passed, clamped to 0–100.
pub fn elapsed_percentage(project: &Project, now: DateTime<Utc>) -> f64 {
    let (Some(start), Some(end)) = (project.start_date, project.estimated_end_date) else {
        return 0.0;
    };
    let start = midnight(start);
    let end = midnight(end);
    let now = now.naive_utc();
    if now < start {
        return 0.0;
    }
    if now > end {
        return 100.0;
    }
    let total = (end - start).num_seconds();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (now - start).num_seconds();
    clamp_percent(round2(elapsed as f64 / total as f64 * 100.0))
}

/// `None` when there is no budget to measure against.
pub fn budget_utilization(spent: f64, budget: f64) -> Option<f64> {
    if budget > 0.0 && spent.is_finite() {
        Some(round2(spent / budget * 100.0))
    } else {
        None
    }
}

pub fn project_budget_utilization(project: &Project) -> Option<f64> {
    budget_utilization(project.spent, project.budget)
}

pub fn is_phase_delayed(phase: &Phase, today: NaiveDate) -> bool {
    phase.end_date.is_some_and(|end| today > end) && !phase.is_complete()
}

pub fn delayed_phases(project: &Project, today: NaiveDate) -> impl Iterator<Item = &Phase> {
    project
        .timeline
        .iter()
        .filter(move |phase| is_phase_delayed(phase, today))
}

pub fn delayed_task_count(project: &Project, today: NaiveDate) -> usize {
    delayed_phases(project, today).count()
}

/// Earliest milestone strictly after `today`, across all phases.
pub fn next_milestone(project: &Project, today: NaiveDate) -> Option<&Milestone> {
    project
        .timeline
        .iter()
        .flat_map(|phase| phase.milestones.iter())
        .filter(|m| m.date.is_some_and(|date| date > today))
        .min_by_key(|m| m.date)
}

pub fn material_spend(materials: &[Material]) -> f64 {
    round2(materials.iter().map(Material::total_value).sum())
}

pub fn low_stock(materials: &[Material]) -> impl Iterator<Item = &Material> {
    materials.iter().filter(|m| m.is_low_stock())
}

/// Percentage of materials above their reorder threshold.
pub fn stock_health(materials: &[Material]) -> Option<f64> {
    if materials.is_empty() {
        return None;
    }
    let healthy = materials.iter().filter(|m| !m.is_low_stock()).count();
    Some(round2(healthy as f64 / materials.len() as f64 * 100.0))
}

/// Progress minus elapsed time; negative means behind schedule.
pub fn schedule_variance(project: &Project, now: DateTime<Utc>) -> f64 {
    round2(project.progress - elapsed_percentage(project, now))
}

pub fn days_remaining(project: &Project, today: NaiveDate) -> Option<i64> {
    project
        .estimated_end_date
        .map(|end| (end - today).num_days().max(0))
}

/// Earliest visit not yet in the past.
pub fn next_visit(visits: &[Visit], now: NaiveDateTime) -> Option<&Visit> {
    visits
        .iter()
        .filter_map(|v| v.scheduled_at().map(|at| (at, v)))
        .filter(|(at, _)| *at >= now)
        .min_by_key(|(at, _)| *at)
        .map(|(_, v)| v)
}

/// Position of the phase running today, else of the first unfinished one.
pub fn current_phase_index(project: &Project, today: NaiveDate) -> Option<usize> {
    let timeline = &project.timeline;
    timeline
        .iter()
        .position(|phase| phase.contains(today))
        .or_else(|| timeline.iter().position(|phase| !phase.is_complete()))
}

pub fn current_phase(project: &Project, today: NaiveDate) -> Option<&Phase> {
    current_phase_index(project, today).map(|index| &project.timeline[index])
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDetails;
    use crate::timeline::{PhaseDraft, Task, TaskStatus};
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn phase(name: &str, end: NaiveDate, progresses: &[f64]) -> Phase {
        let mut phase = PhaseDraft {
            phase: name.into(),
            start_date: Some(day(2024, 1, 1)),
            end_date: Some(end),
            milestones: vec![],
            tasks: progresses
                .iter()
                .map(|p| Task::new("tarefa", TaskStatus::InProgress, *p))
                .collect(),
        }
        .into_phase();
        phase.progress = phase_progress(&phase);
        phase
    }

    fn project_between(start: NaiveDate, end: NaiveDate) -> Project {
        Project::new(ProjectDetails {
            name: "Edifício Horizonte".into(),
            start_date: Some(start),
            estimated_end_date: Some(end),
            budget: 1_500_000.0,
            spent: 675_000.0,
            ..Default::default()
        })
    }

    #[test]
    fn empty_phase_has_zero_progress() {
        assert_eq!(phase_progress(&phase("Vazia", day(2024, 2, 1), &[])), 0.0);
    }

    #[test]
    fn phase_progress_is_rounded_mean() {
        assert_eq!(phase("A", day(2024, 2, 1), &[100.0, 60.0]).progress, 80.0);
        assert_eq!(phase("B", day(2024, 2, 1), &[100.0, 75.0, 60.0]).progress, 78.33);
    }

    #[test]
    fn overall_progress_means_phases() {
        assert_eq!(overall_progress(&[]), 0.0);
        let timeline = vec![
            phase("Fundação", day(2024, 3, 15), &[100.0, 100.0, 100.0]),
            phase("Estrutura", day(2024, 6, 15), &[100.0, 60.0, 20.0]),
        ];
        assert_eq!(overall_progress(&timeline), 80.0);
    }

    #[test]
    fn recompute_clamps_out_of_range_tasks() {
        let mut project = project_between(day(2024, 1, 1), day(2024, 12, 31));
        project.timeline.push(phase("Fundação", day(2024, 3, 1), &[]));
        project.timeline[0]
            .tasks
            .push(Task::new("Escavação", TaskStatus::Completed, 140.0));
        recompute_progress(&mut project);
        assert_eq!(project.timeline[0].tasks[0].progress, 100.0);
        assert_eq!(project.progress, 100.0);
    }

    #[test]
    fn elapsed_is_clamped_and_monotonic() {
        let project = project_between(day(2024, 1, 1), day(2024, 12, 31));
        assert_eq!(elapsed_percentage(&project, at(2023, 6, 1)), 0.0);
        assert_eq!(elapsed_percentage(&project, at(2025, 6, 1)), 100.0);

        let mut previous = 0.0;
        let mut now = at(2023, 12, 1);
        while now < at(2025, 2, 1) {
            let pct = elapsed_percentage(&project, now);
            assert!(pct >= previous, "{} dropped below {}", pct, previous);
            assert!((0.0..=100.0).contains(&pct));
            previous = pct;
            now += chrono::Duration::days(7);
        }
    }

    #[test]
    fn elapsed_without_dates_is_zero() {
        let mut project = project_between(day(2024, 1, 1), day(2024, 12, 31));
        project.estimated_end_date = None;
        assert_eq!(elapsed_percentage(&project, at(2024, 6, 1)), 0.0);
    }

    #[test]
    fn zero_budget_has_no_utilization() {
        assert_eq!(budget_utilization(1000.0, 0.0), None);
        assert_eq!(budget_utilization(675_000.0, 1_500_000.0), Some(45.0));
    }

    #[test]
    fn delayed_phases_need_past_end_and_open_work() {
        let mut project = project_between(day(2024, 1, 1), day(2024, 12, 31));
        project.timeline = vec![
            phase("Fundação", day(2024, 3, 15), &[100.0]),
            phase("Estrutura", day(2024, 6, 15), &[100.0, 60.0]),
            phase("Alvenaria", day(2024, 9, 1), &[0.0]),
        ];
        assert_eq!(delayed_task_count(&project, day(2024, 6, 15)), 0);
        assert_eq!(delayed_task_count(&project, day(2024, 6, 16)), 1);
        assert_eq!(delayed_task_count(&project, day(2024, 10, 1)), 2);
    }

    #[test]
    fn next_milestone_is_strictly_after_today() {
        let mut project = project_between(day(2024, 1, 1), day(2024, 12, 31));
        let mut foundation = phase("Fundação", day(2024, 3, 15), &[]);
        foundation.milestones = vec![
            Milestone { date: Some(day(2024, 3, 15)), description: "Fundação finalizada".into() },
            Milestone { date: Some(day(2024, 2, 1)), description: "Escavação".into() },
        ];
        project.timeline.push(foundation);

        let next = next_milestone(&project, day(2024, 1, 20)).unwrap();
        assert_eq!(next.description, "Escavação");
        let next = next_milestone(&project, day(2024, 2, 1)).unwrap();
        assert_eq!(next.description, "Fundação finalizada");
        assert!(next_milestone(&project, day(2024, 3, 15)).is_none());
    }

    #[test]
    fn days_remaining_never_negative() {
        let project = project_between(day(2024, 1, 1), day(2024, 1, 31));
        assert_eq!(days_remaining(&project, day(2024, 1, 21)), Some(10));
        assert_eq!(days_remaining(&project, day(2024, 3, 1)), Some(0));
    }
}
