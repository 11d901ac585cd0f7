//! End-to-end scenarios run against an in-memory store.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sitedesk::manage::Confirmation;
use sitedesk::material::{MaterialCategory, MaterialInput};
use sitedesk::project::ProjectDetails;
use sitedesk::repository::ProjectRepository;
use sitedesk::store::{MemoryStore, ProjectStore};
use sitedesk::timeline::{PhaseDraft, Task, TaskStatus};
use sitedesk::views::{materials, visits};
use sitedesk::visit::VisitInput;

fn repo_with_project(name: &str) -> (ProjectRepository<MemoryStore>, String) {
    let mut repo = ProjectRepository::open(MemoryStore::new());
    let id = repo
        .create_project(ProjectDetails {
            name: name.into(),
            budget: 500_000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            estimated_end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..Default::default()
        })
        .unwrap()
        .id;
    (repo, id)
}

fn material(quantity: f64, min_quantity: f64) -> MaterialInput {
    MaterialInput {
        name: "Cimento".into(),
        quantity,
        unit: "sacos".into(),
        unit_price: 25.0,
        min_quantity: Some(min_quantity),
        supplier: Some("Votorantim".into()),
        category: MaterialCategory::Basic,
    }
}

fn visit_on(date: NaiveDate, purpose: &str) -> VisitInput {
    VisitInput {
        date: Some(date),
        time: "10:00".into(),
        purpose: purpose.into(),
        participants: "João Silva".into(),
        location: "Canteiro".into(),
        observations: String::new(),
    }
}

#[test]
fn only_phase_sets_project_progress() {
    let (mut repo, id) = repo_with_project("Edifício Horizonte");
    let phase = repo
        .add_phase(
            &id,
            PhaseDraft {
                phase: "Fundação".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                end_date: NaiveDate::from_ymd_opt(2024, 3, 15),
                milestones: vec![],
                tasks: vec![
                    Task::new("Escavação", TaskStatus::Completed, 100.0),
                    Task::new("Armação", TaskStatus::InProgress, 60.0),
                ],
            },
        )
        .unwrap();
    assert_eq!(phase.progress, 80.0);
    assert_eq!(repo.get(&id).unwrap().progress, 80.0);
}

#[test]
fn restocking_clears_low_stock_alert() {
    let (mut repo, id) = repo_with_project("Residencial Parque Verde");
    let added = repo.add_material(&id, material(5.0, 10.0)).unwrap();

    let alerts = materials::low_stock_rows(repo.projects());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].material_id, added.id);

    repo.update_material(&id, &added.id, material(15.0, 10.0)).unwrap();
    assert!(materials::low_stock_rows(repo.projects()).is_empty());
}

#[test]
fn deleting_project_cascades_to_aggregates() {
    let (mut repo, keep) = repo_with_project("Galpão Norte");
    let doomed = repo
        .create_project(ProjectDetails { name: "Loja Centro".into(), ..Default::default() })
        .unwrap()
        .id;
    repo.add_material(&keep, material(50.0, 10.0)).unwrap();
    repo.add_material(&doomed, material(50.0, 10.0)).unwrap();
    repo.add_material(&doomed, material(20.0, 10.0)).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    repo.schedule_visit(&keep, visit_on(day, "Vistoria")).unwrap();
    repo.schedule_visit(&doomed, visit_on(day, "Medição")).unwrap();

    assert_eq!(materials::overview(repo.projects()).material_count, 3);
    assert_eq!(visits::all_visits(repo.projects()).len(), 2);

    assert!(!repo.delete_project(&doomed, Confirmation::Declined).unwrap());
    assert_eq!(materials::overview(repo.projects()).material_count, 3);

    assert!(repo.delete_project(&doomed, Confirmation::Confirmed).unwrap());
    assert_eq!(materials::overview(repo.projects()).material_count, 1);
    assert_eq!(visits::all_visits(repo.projects()).len(), 1);
    assert!(repo.get(&doomed).is_err());

    let reloaded = repo.store().load();
    assert!(reloaded.iter().all(|p| p.id != doomed));
}

#[test]
fn next_visit_is_the_upcoming_one() {
    let (mut repo, id) = repo_with_project("Edifício Horizonte");
    let now: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 6, 10)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .unwrap();
    let today = now.date();
    repo.schedule_visit(&id, visit_on(today + Duration::days(1), "Amanhã")).unwrap();
    repo.schedule_visit(&id, visit_on(today - Duration::days(1), "Ontem")).unwrap();

    let overview = visits::overview(repo.projects(), now, 7);
    assert_eq!(overview.next_visit.unwrap().visit.purpose, "Amanhã");

    let project = visits::project_visits(repo.get(&id).unwrap(), now);
    assert_eq!(project.next_visit.unwrap().purpose, "Amanhã");
    assert_eq!(project.visits[0].purpose, "Ontem");
}

#[test]
fn reload_after_save_is_idempotent() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let repo = ProjectRepository::open_seeded(store.clone()).unwrap();
    let first = store.load();
    store.save(&first).unwrap();
    let second = store.load();
    assert_eq!(first, second);
    assert_eq!(second, repo.projects());
}
