use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Configuration stored in ~/.staffdesk/config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the per-collection JSON files.
    pub data_path: String,
}

// =============================================================================
// Base entities
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Staffing,
    Factory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    pub contract_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_value: f64,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    /// Display name for the engagement: the project name when set,
    /// otherwise the contract number.
    pub fn display_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(&self.contract_number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Open,
    Filled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub contract_id: String,
    pub title: String,
    pub stack_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_id: Option<String>,
    pub status: PositionStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Share of a full-time slot this position represents, 1–100.
    pub allocation_percentage: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalStatus {
    Allocated,
    Idle,
    Partial,
    Vacation,
    Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Allocation,
    Factory,
    Both,
}

impl WorkMode {
    /// Whether a professional with this mode belongs to the factory pool.
    pub fn is_factory_eligible(self) -> bool {
        matches!(self, WorkMode::Factory | WorkMode::Both)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackExperience {
    pub stack_id: String,
    /// Years in this specific stack (anything under 2 is entered as 1).
    pub years_experience: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_seniority_id: Option<String>,
    #[serde(default)]
    pub stack_experiences: Vec<StackExperience>,
    pub status: ProfessionalStatus,
    pub work_mode: WorkMode,
    /// Reference to another Professional. Plain foreign key; the data does
    /// not guarantee the relation forms a tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_years_experience: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Professional {
    /// The professional's primary stack: the first experience entry.
    pub fn primary_stack_id(&self) -> Option<&str> {
        self.stack_experiences.first().map(|e| e.stack_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    pub professional_id: String,
    pub position_id: String,
    pub start_date: NaiveDate,
    /// Absent means the allocation runs to its position's end date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub allocation_percentage: u8,
    pub created_at: DateTime<Utc>,
}

impl Allocation {
    /// Effective end date: the allocation's own end date, falling back to
    /// the parent position's. `None` when neither is resolvable.
    pub fn effective_end_date(&self, position: Option<&Position>) -> Option<NaiveDate> {
        self.end_date.or_else(|| position.map(|p| p.end_date))
    }

    /// Active when the effective end date is today or later. An allocation
    /// whose end date cannot be resolved at all is not considered active.
    pub fn is_active(&self, position: Option<&Position>, today: NaiveDate) -> bool {
        self.effective_end_date(position)
            .is_some_and(|end| end >= today)
    }
}

// =============================================================================
// Factory (software factory line of business)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryProjectStatus {
    Planned,
    InProgress,
    Finished,
    Paused,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryProject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: FactoryProjectStatus,
    /// Manually maintained, independent of time elapsed.
    pub progress_percentage: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryRole {
    Dev,
    Qa,
    Po,
    Pm,
    TechLead,
    Architect,
    ScrumMaster,
    Ux,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryAllocation {
    pub id: String,
    pub project_id: String,
    pub professional_id: String,
    pub role: FactoryRole,
    pub stack_id: String,
    pub start_date: NaiveDate,
    /// Always present; factory allocations carry their own end date.
    pub end_date: NaiveDate,
    pub allocation_percentage: u8,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Taxonomy
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category-specific seniority ladder entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seniority {
    pub id: String,
    pub name: String,
    /// For ordering (1 = most junior).
    pub level: u32,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Company-wide seniority grade, independent of stack category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSeniority {
    pub id: String,
    pub name: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Derived results
// =============================================================================

/// Contract lifecycle status. Never stored; always recomputed from the
/// contract's end date and an explicit `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "expiring_30")]
    Expiring30,
    #[serde(rename = "expiring_60")]
    Expiring60,
    #[serde(rename = "expiring_90")]
    Expiring90,
    #[serde(rename = "expired")]
    Expired,
}

impl ContractStatus {
    /// Whether this status falls inside the cumulative N-day risk band.
    /// Risk bands accumulate: a contract in the 30-day band also counts
    /// toward the 60- and 90-day figures.
    pub fn expiring_within(self, days: u32) -> bool {
        match self {
            ContractStatus::Expiring30 => days >= 30,
            ContractStatus::Expiring60 => days >= 60,
            ContractStatus::Expiring90 => days >= 90,
            ContractStatus::Active | ContractStatus::Expired => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractWithDetails {
    #[serde(flatten)]
    pub contract: Contract,
    pub client: Client,
    pub positions: Vec<Position>,
    pub status: ContractStatus,
    pub days_until_expiration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_contracts: usize,
    pub active_contracts: usize,
    pub total_clients: usize,
    pub total_professionals: usize,
    pub total_positions: usize,
    pub filled_positions: usize,
    pub open_positions: usize,
    pub monthly_revenue: f64,
    pub revenue_at_risk_30: f64,
    pub revenue_at_risk_60: f64,
    pub revenue_at_risk_90: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringContractsGroup {
    pub days: u32,
    pub contracts: Vec<ContractWithDetails>,
    pub clients_affected: usize,
    pub professionals_involved: usize,
    pub total_monthly_value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackDistribution {
    pub stack_id: String,
    pub stack_name: String,
    pub category_id: String,
    pub category_name: String,
    pub professional_count: usize,
    pub position_count: usize,
    pub filled_positions: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub client: Client,
    pub active_contracts: usize,
    pub total_positions: usize,
    pub filled_positions: usize,
    pub total_monthly_value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationTimelineEntry {
    pub id: String,
    pub professional_id: String,
    pub professional_name: String,
    pub position_title: String,
    pub stack_name: String,
    pub category_name: String,
    pub client_name: String,
    pub project_name: String,
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub allocation_percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub professional_id: String,
    pub professional_name: String,
    pub position_title: String,
    pub stack_name: String,
    pub category_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub allocation_percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub contract_id: String,
    pub contract_number: String,
    pub project_name: String,
    pub client_name: String,
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ContractStatus,
    pub days_until_expiration: i64,
    pub members: Vec<TeamMember>,
    pub total_positions: usize,
    pub filled_positions: usize,
}

/// One professional predicted to go idle inside a forecast window.
/// `current_client_name` is only set for the general staffing pool;
/// factory engagements have no client attached to the allocation chain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleForecastEntry {
    pub professional_id: String,
    pub professional_name: String,
    pub stack_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_client_name: Option<String>,
    pub current_project_name: String,
    pub allocation_end_date: NaiveDate,
    pub days_until_idle: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyForecast {
    pub period: u32,
    pub current_allocated: usize,
    pub predicted_idle: usize,
    pub predicted_idle_professionals: Vec<IdleForecastEntry>,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryAllocationWithDetails {
    #[serde(flatten)]
    pub allocation: FactoryAllocation,
    pub professional: Professional,
    pub stack: Stack,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryProjectWithDetails {
    #[serde(flatten)]
    pub project: FactoryProject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    pub allocations: Vec<FactoryAllocationWithDetails>,
    pub total_members: usize,
    pub days_remaining: i64,
    pub days_elapsed: i64,
    pub total_days: i64,
    /// Time-elapsed progress, for comparison against the manually-set
    /// `progressPercentage`.
    pub calculated_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryDashboardMetrics {
    pub total_projects: usize,
    pub active_projects: usize,
    pub planned_projects: usize,
    pub finished_projects: usize,
    pub paused_projects: usize,
    pub total_factory_professionals: usize,
    pub current_occupancy_rate: f64,
    pub occupancy_30_days: f64,
    pub occupancy_60_days: f64,
    pub occupancy_90_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GanttEntryKind {
    Project,
    Professional,
}

/// Flat Gantt row: either a project bar or a member bar under it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryGanttEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GanttEntryKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<FactoryRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FactoryProjectStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderMetrics {
    pub leader_id: String,
    pub leader_name: String,
    pub total_professionals: usize,
    pub allocated_professionals: usize,
    pub idle_professionals: usize,
    pub professionals: Vec<Professional>,
}
