//! Example sites planted into an empty store on first start.

use crate::document::{Document, DocumentCategory, DocumentStatus, DocumentType};
use crate::material::{Material, MaterialCategory};
use crate::photo::Photo;
use crate::project::{ConstructionType, Project, ProjectDetails, ProjectStatus};
use crate::repository::new_id;
use crate::timeline::{Milestone, Phase, Task, TaskStatus};
use crate::visit::Visit;
use chrono::NaiveDate;

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn material(
    name: &str,
    quantity: f64,
    unit: &str,
    unit_price: f64,
    min_quantity: f64,
    supplier: &str,
    category: MaterialCategory,
) -> Material {
    Material {
        id: new_id(),
        name: name.into(),
        quantity,
        unit: unit.into(),
        unit_price,
        min_quantity,
        supplier: supplier.into(),
        category,
    }
}

fn photo(description: &str, location: &str, date: Option<NaiveDate>) -> Photo {
    Photo {
        id: new_id(),
        url: "/api/placeholder/400/300".into(),
        description: description.into(),
        location: location.into(),
        date,
    }
}

fn milestone(date: Option<NaiveDate>, description: &str) -> Milestone {
    Milestone {
        date,
        description: description.into(),
    }
}

fn document(
    name: &str,
    status: DocumentStatus,
    expiry_date: Option<NaiveDate>,
    file: &str,
) -> Document {
    Document {
        id: new_id(),
        name: name.into(),
        status,
        expiry_date,
        file_data: format!("/api/placeholder/{}", file),
    }
}

fn visit(
    date: Option<NaiveDate>,
    time: &str,
    purpose: &str,
    participants: &str,
    location: &str,
    observations: &str,
) -> Visit {
    Visit {
        id: new_id(),
        date,
        time: time.into(),
        purpose: purpose.into(),
        participants: participants.into(),
        location: location.into(),
        observations: observations.into(),
    }
}

pub fn example_projects() -> Vec<Project> {
    vec![horizonte(), parque_verde()]
}

fn horizonte() -> Project {
    let mut project = Project::new(ProjectDetails {
        name: "Edifício Horizonte".into(),
        address: "Rua das Palmeiras, 123".into(),
        start_date: ymd(2024, 1, 15),
        estimated_end_date: ymd(2025, 6, 30),
        budget: 1_500_000.0,
        spent: 675_000.0,
        status: ProjectStatus::InProgress,
        construction_type: ConstructionType::Residential,
        total_area: 5000.0,
        number_of_units: 24,
        responsible_engineer: "João Silva".into(),
        description: "Edifício residencial de alto padrão com 24 unidades".into(),
        materials_budget: Some(200_000.0),
    });

    project.materials = vec![
        material("Cimento", 100.0, "sacos", 25.0, 20.0, "Votorantim", MaterialCategory::Basic),
        material("Vergalhões", 50.0, "barras", 45.0, 10.0, "Gerdau", MaterialCategory::Steel),
    ];
    project.photos = vec![
        photo("Fundação concluída", "Térreo", ymd(2024, 1, 20)),
        photo("Estrutura do 1º andar", "1º Pavimento", ymd(2024, 2, 15)),
    ];
    project.timeline = vec![
        Phase {
            phase: "Fundação".into(),
            start_date: ymd(2024, 1, 15),
            end_date: ymd(2024, 3, 15),
            progress: 0.0,
            milestones: vec![
                milestone(ymd(2024, 2, 1), "Conclusão da escavação"),
                milestone(ymd(2024, 3, 15), "Fundação finalizada"),
            ],
            tasks: vec![
                Task::new("Escavação", TaskStatus::Completed, 100.0),
                Task::new("Armação", TaskStatus::Completed, 100.0),
                Task::new("Concretagem", TaskStatus::Completed, 100.0),
            ],
        },
        Phase {
            phase: "Estrutura".into(),
            start_date: ymd(2024, 3, 16),
            end_date: ymd(2024, 6, 15),
            progress: 0.0,
            milestones: vec![milestone(ymd(2024, 4, 15), "Conclusão do primeiro pavimento")],
            tasks: vec![
                Task::new("Pilares térreo", TaskStatus::Completed, 100.0),
                Task::new("Laje primeiro pav.", TaskStatus::InProgress, 60.0),
                Task::new("Pilares primeiro pav.", TaskStatus::Pending, 0.0),
            ],
        },
    ];
    project.documents = vec![
        DocumentCategory {
            doc_type: DocumentType::Design,
            items: vec![
                document("Projeto Arquitetônico", DocumentStatus::Approved, None, "doc1.pdf"),
                document("Projeto Estrutural", DocumentStatus::Approved, None, "doc2.pdf"),
            ],
        },
        DocumentCategory {
            doc_type: DocumentType::Permits,
            items: vec![
                document("Alvará de Construção", DocumentStatus::Approved, ymd(2025, 1, 15), "doc3.pdf"),
                document("Licença Ambiental", DocumentStatus::Approved, ymd(2024, 12, 31), "doc4.pdf"),
            ],
        },
    ];
    project.visits = vec![
        visit(
            ymd(2024, 3, 25),
            "14:00",
            "Vistoria Estrutural",
            "João Silva, Maria Santos",
            "Pavimento 3",
            "Verificação das instalações elétricas",
        ),
        visit(
            ymd(2024, 3, 28),
            "09:00",
            "Medição Mensal",
            "Carlos Oliveira",
            "Obra completa",
            "Medição para faturamento",
        ),
    ];
    project
}

fn parque_verde() -> Project {
    let mut project = Project::new(ProjectDetails {
        name: "Residencial Parque Verde".into(),
        address: "Av. Principal, 500".into(),
        start_date: ymd(2024, 2, 1),
        estimated_end_date: ymd(2025, 8, 30),
        budget: 800_000.0,
        spent: 120_000.0,
        status: ProjectStatus::Planning,
        construction_type: ConstructionType::Residential,
        total_area: 3000.0,
        number_of_units: 16,
        responsible_engineer: "Maria Santos".into(),
        description: "Condomínio residencial voltado para famílias".into(),
        materials_budget: Some(150_000.0),
    });

    project.materials = vec![
        material("Tijolos", 5000.0, "unidades", 0.5, 1000.0, "Cerâmica Silva", MaterialCategory::Masonry),
        material("Areia", 30.0, "m³", 120.0, 5.0, "Areial Central", MaterialCategory::Basic),
    ];
    project.photos = vec![
        photo("Preparação do terreno", "Terreno", ymd(2024, 2, 1)),
        photo("Início da fundação", "Térreo", ymd(2024, 3, 10)),
    ];
    project.timeline = vec![Phase {
        phase: "Preparação do Terreno".into(),
        start_date: ymd(2024, 2, 1),
        end_date: ymd(2024, 3, 15),
        progress: 0.0,
        milestones: vec![
            milestone(ymd(2024, 2, 15), "Limpeza do terreno concluída"),
            milestone(ymd(2024, 3, 1), "Topografia finalizada"),
        ],
        tasks: vec![
            Task::new("Limpeza", TaskStatus::Completed, 100.0),
            Task::new("Nivelamento", TaskStatus::InProgress, 75.0),
            Task::new("Demarcação", TaskStatus::InProgress, 60.0),
        ],
    }];
    project.documents = vec![
        DocumentCategory {
            doc_type: DocumentType::Design,
            items: vec![
                document("Projeto Arquitetônico", DocumentStatus::Approved, None, "doc5.pdf"),
                document("Projeto Estrutural", DocumentStatus::Pending, None, "doc6.pdf"),
            ],
        },
        DocumentCategory {
            doc_type: DocumentType::Permits,
            items: vec![
                document("Alvará de Construção", DocumentStatus::Pending, None, "doc7.pdf"),
                document("Licença Ambiental", DocumentStatus::Approved, ymd(2024, 12, 31), "doc8.pdf"),
            ],
        },
    ];
    project.visits = vec![visit(
        ymd(2024, 3, 26),
        "10:00",
        "Inspeção de Qualidade",
        "Ana Paula, Roberto Carlos",
        "Área comum",
        "Verificação dos acabamentos",
    )];
    project
}
