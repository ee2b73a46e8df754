//! First-run seed collections.
//!
//! Dates are expressed relative to an injected anchor so the demo data
//! always lands in meaningful dashboard bands (contracts expiring in 30,
//! 60, and 90 days, one already expired) no matter when it is generated.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::store::DataStore;
use crate::types::{
    Allocation, Client, Contract, ContractType, FactoryAllocation, FactoryProject,
    FactoryProjectStatus, FactoryRole, GeneralSeniority, Position, PositionStatus, Professional,
    ProfessionalStatus, Seniority, Stack, StackCategory, StackExperience, WorkMode,
};

fn days_from(anchor: NaiveDate, days: i64) -> NaiveDate {
    anchor + Duration::days(days)
}

fn created(anchor: NaiveDate, days_ago: i64) -> DateTime<Utc> {
    (anchor - Duration::days(days_ago))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Build the full seeded store, with every relative date pinned to
/// `anchor`.
pub fn seed_store(anchor: NaiveDate) -> DataStore {
    let stack_categories = vec![
        category("cat-1", "Development", anchor),
        category("cat-2", "QA", anchor),
        category("cat-3", "Management", anchor),
    ];

    let stacks = vec![
        stack("stack-1", "React", "cat-1", anchor),
        stack("stack-2", "Node.js", "cat-1", anchor),
        stack("stack-3", "Python", "cat-1", anchor),
        stack("stack-4", "DevOps", "cat-1", anchor),
        stack("stack-5", "QA Automation", "cat-2", anchor),
        stack("stack-6", "Product Owner", "cat-3", anchor),
    ];

    let seniorities = vec![
        seniority("sen-1", "Junior", 1, "cat-1", anchor),
        seniority("sen-2", "Mid-level", 2, "cat-1", anchor),
        seniority("sen-3", "Senior", 3, "cat-1", anchor),
        seniority("sen-4", "Junior", 1, "cat-2", anchor),
        seniority("sen-5", "Senior", 2, "cat-2", anchor),
    ];

    let general_seniorities = vec![
        general_seniority("gsen-1", "A1", 1, anchor),
        general_seniority("gsen-2", "B1", 2, anchor),
        general_seniority("gsen-3", "C1", 3, anchor),
    ];

    let clients = vec![
        client("client-1", "Harbor Bank", "60.701.190/0001-04", "julia.reis@harborbank.com", anchor, 300),
        client("client-2", "Northwind Retail", "47.960.950/0001-21", "marcos.lima@northwind.com", anchor, 280),
        client("client-3", "Atlas Energy", "33.000.167/0001-01", "carla.nunes@atlasenergy.com", anchor, 260),
        client("client-4", "Vetra Logistics", "07.526.557/0001-00", "pedro.alves@vetra.com", anchor, 220),
    ];

    let contracts = vec![
        contract("contract-1", "client-1", "CTR-2024-001", Some("Mobile Banking"), ContractType::Staffing, anchor, 335, 25, 85_000.0),
        contract("contract-2", "client-2", "CTR-2024-002", Some("E-commerce Platform"), ContractType::Staffing, anchor, 320, 15, 42_000.0),
        contract("contract-3", "client-3", "CTR-2024-003", Some("Field Operations Suite"), ContractType::Factory, anchor, 300, 55, 120_000.0),
        contract("contract-4", "client-1", "CTR-2024-004", Some("Customer Portal"), ContractType::Staffing, anchor, 280, 85, 65_000.0),
        contract("contract-5", "client-4", "CTR-2024-005", Some("Route Planner"), ContractType::Staffing, anchor, 200, 165, 48_000.0),
        contract("contract-6", "client-4", "CTR-2023-001", Some("Legacy WMS"), ContractType::Staffing, anchor, 400, -35, 45_000.0),
    ];

    let positions = vec![
        position("pos-1", "contract-1", "Senior React Developer", "stack-1", Some("sen-3"), PositionStatus::Filled, anchor, 335, 25),
        position("pos-2", "contract-1", "QA Analyst", "stack-5", Some("sen-5"), PositionStatus::Filled, anchor, 200, 25),
        position("pos-3", "contract-2", "Full Stack Developer", "stack-2", Some("sen-2"), PositionStatus::Filled, anchor, 320, 15),
        position("pos-4", "contract-4", "DevOps Engineer", "stack-4", Some("sen-3"), PositionStatus::Filled, anchor, 280, 85),
        position("pos-5", "contract-4", "Product Owner", "stack-6", None, PositionStatus::Open, anchor, 100, 85),
        position("pos-6", "contract-5", "Python Developer", "stack-3", Some("sen-2"), PositionStatus::Filled, anchor, 200, 165),
    ];

    let professionals = vec![
        professional("prof-1", "Ana Souza", "ana.souza@example.com", Some("gsen-3"), &[("stack-1", 6), ("stack-2", 3)], ProfessionalStatus::Allocated, WorkMode::Allocation, None, anchor, 300),
        professional("prof-2", "Bruno Carvalho", "bruno.carvalho@example.com", Some("gsen-2"), &[("stack-5", 4)], ProfessionalStatus::Allocated, WorkMode::Allocation, Some("prof-1"), anchor, 280),
        professional("prof-3", "Clara Mendes", "clara.mendes@example.com", Some("gsen-2"), &[("stack-2", 5)], ProfessionalStatus::Allocated, WorkMode::Both, Some("prof-1"), anchor, 260),
        professional("prof-4", "Diego Ferreira", "diego.ferreira@example.com", Some("gsen-1"), &[("stack-4", 2)], ProfessionalStatus::Allocated, WorkMode::Allocation, Some("prof-1"), anchor, 240),
        professional("prof-5", "Elisa Rocha", "elisa.rocha@example.com", Some("gsen-2"), &[("stack-3", 4)], ProfessionalStatus::Partial, WorkMode::Both, None, anchor, 220),
        professional("prof-6", "Fábio Teixeira", "fabio.teixeira@example.com", Some("gsen-1"), &[("stack-3", 3)], ProfessionalStatus::Idle, WorkMode::Factory, None, anchor, 180),
    ];

    let allocations = vec![
        allocation("alloc-1", "prof-1", "pos-1", anchor, 335, None),
        allocation("alloc-2", "prof-2", "pos-2", anchor, 200, None),
        allocation("alloc-3", "prof-3", "pos-3", anchor, 320, None),
        allocation("alloc-4", "prof-4", "pos-4", anchor, 280, Some(60)),
        allocation("alloc-5", "prof-5", "pos-6", anchor, 200, None),
    ];

    let factory_projects = vec![
        factory_project("fproj-1", "Field Operations Suite", Some("client-3"), "Inspection and maintenance workflows for field crews", FactoryProjectStatus::InProgress, 55.0, anchor, 300, 55),
        factory_project("fproj-2", "Inventory Insights", Some("client-2"), "Stock forecasting dashboard", FactoryProjectStatus::Planned, 0.0, anchor, -10, 170),
    ];

    let factory_allocations = vec![
        factory_allocation("falloc-1", "fproj-1", "prof-3", FactoryRole::TechLead, "stack-2", anchor, 300, 55),
        factory_allocation("falloc-2", "fproj-1", "prof-6", FactoryRole::Dev, "stack-3", anchor, 150, 55),
        factory_allocation("falloc-3", "fproj-2", "prof-5", FactoryRole::Dev, "stack-3", anchor, -10, 170),
    ];

    DataStore {
        clients,
        contracts,
        stacks,
        stack_categories,
        seniorities,
        general_seniorities,
        positions,
        professionals,
        allocations,
        factory_projects,
        factory_allocations,
    }
}

fn category(id: &str, name: &str, anchor: NaiveDate) -> StackCategory {
    StackCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: created(anchor, 400),
    }
}

fn stack(id: &str, name: &str, category_id: &str, anchor: NaiveDate) -> Stack {
    Stack {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        created_at: created(anchor, 365),
    }
}

fn seniority(id: &str, name: &str, level: u32, category_id: &str, anchor: NaiveDate) -> Seniority {
    Seniority {
        id: id.to_string(),
        name: name.to_string(),
        level,
        category_id: category_id.to_string(),
        description: None,
        created_at: created(anchor, 400),
    }
}

fn general_seniority(id: &str, name: &str, level: u32, anchor: NaiveDate) -> GeneralSeniority {
    GeneralSeniority {
        id: id.to_string(),
        name: name.to_string(),
        level,
        description: None,
        created_at: created(anchor, 400),
    }
}

fn client(id: &str, name: &str, tax_id: &str, contact: &str, anchor: NaiveDate, age_days: i64) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        tax_id: tax_id.to_string(),
        contact: contact.to_string(),
        created_at: created(anchor, age_days),
    }
}

#[allow(clippy::too_many_arguments)]
fn contract(
    id: &str,
    client_id: &str,
    number: &str,
    project_name: Option<&str>,
    contract_type: ContractType,
    anchor: NaiveDate,
    started_days_ago: i64,
    ends_in_days: i64,
    monthly_value: f64,
) -> Contract {
    Contract {
        id: id.to_string(),
        client_id: client_id.to_string(),
        contract_number: number.to_string(),
        project_name: project_name.map(|s| s.to_string()),
        contract_type,
        start_date: days_from(anchor, -started_days_ago),
        end_date: days_from(anchor, ends_in_days),
        monthly_value,
        created_at: created(anchor, started_days_ago),
    }
}

#[allow(clippy::too_many_arguments)]
fn position(
    id: &str,
    contract_id: &str,
    title: &str,
    stack_id: &str,
    seniority_id: Option<&str>,
    status: PositionStatus,
    anchor: NaiveDate,
    started_days_ago: i64,
    ends_in_days: i64,
) -> Position {
    Position {
        id: id.to_string(),
        contract_id: contract_id.to_string(),
        title: title.to_string(),
        stack_id: stack_id.to_string(),
        seniority_id: seniority_id.map(|s| s.to_string()),
        status,
        start_date: days_from(anchor, -started_days_ago),
        end_date: days_from(anchor, ends_in_days),
        allocation_percentage: 100,
        created_at: created(anchor, started_days_ago),
    }
}

#[allow(clippy::too_many_arguments)]
fn professional(
    id: &str,
    name: &str,
    email: &str,
    general_seniority_id: Option<&str>,
    experiences: &[(&str, u32)],
    status: ProfessionalStatus,
    work_mode: WorkMode,
    leader_id: Option<&str>,
    anchor: NaiveDate,
    age_days: i64,
) -> Professional {
    Professional {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(email.to_string()),
        general_seniority_id: general_seniority_id.map(|s| s.to_string()),
        stack_experiences: experiences
            .iter()
            .map(|(stack_id, years)| StackExperience {
                stack_id: stack_id.to_string(),
                years_experience: *years,
            })
            .collect(),
        status,
        work_mode,
        leader_id: leader_id.map(|s| s.to_string()),
        total_years_experience: experiences.iter().map(|(_, years)| years).max().copied(),
        created_at: created(anchor, age_days),
    }
}

fn allocation(
    id: &str,
    professional_id: &str,
    position_id: &str,
    anchor: NaiveDate,
    started_days_ago: i64,
    ends_in_days: Option<i64>,
) -> Allocation {
    Allocation {
        id: id.to_string(),
        professional_id: professional_id.to_string(),
        position_id: position_id.to_string(),
        start_date: days_from(anchor, -started_days_ago),
        end_date: ends_in_days.map(|d| days_from(anchor, d)),
        allocation_percentage: 100,
        created_at: created(anchor, started_days_ago),
    }
}

#[allow(clippy::too_many_arguments)]
fn factory_project(
    id: &str,
    name: &str,
    client_id: Option<&str>,
    description: &str,
    status: FactoryProjectStatus,
    progress: f64,
    anchor: NaiveDate,
    started_days_ago: i64,
    ends_in_days: i64,
) -> FactoryProject {
    FactoryProject {
        id: id.to_string(),
        name: name.to_string(),
        client_id: client_id.map(|s| s.to_string()),
        description: description.to_string(),
        start_date: days_from(anchor, -started_days_ago),
        end_date: days_from(anchor, ends_in_days),
        status,
        progress_percentage: progress,
        created_at: created(anchor, started_days_ago.max(0)),
    }
}

#[allow(clippy::too_many_arguments)]
fn factory_allocation(
    id: &str,
    project_id: &str,
    professional_id: &str,
    role: FactoryRole,
    stack_id: &str,
    anchor: NaiveDate,
    started_days_ago: i64,
    ends_in_days: i64,
) -> FactoryAllocation {
    FactoryAllocation {
        id: id.to_string(),
        project_id: project_id.to_string(),
        professional_id: professional_id.to_string(),
        role,
        stack_id: stack_id.to_string(),
        start_date: days_from(anchor, -started_days_ago),
        end_date: days_from(anchor, ends_in_days),
        allocation_percentage: 100,
        created_at: created(anchor, started_days_ago.max(0)),
    }
}
