// Dashboard service — global counts, revenue-at-risk bands, and the
// 30/60/90-day expiration cohorts.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::lookup::by_id;
use crate::types::{
    Allocation, Client, Contract, ContractWithDetails, DashboardMetrics, ExpiringContractsGroup,
    Position, PositionStatus, Professional,
};

/// Forecast and risk windows used across the dashboard, in days.
pub const RISK_WINDOWS: [u32; 3] = [30, 60, 90];

/// Reduce the enriched contract set plus raw collection counts into the
/// headline dashboard figures.
///
/// Risk banding is cumulative: a contract expiring in 25 days counts
/// toward the 30-, 60-, and 90-day revenue-at-risk figures alike.
/// `contracts` is passed alongside `enriched` because the total counts raw
/// rows, including any dropped during enrichment.
pub fn dashboard_metrics(
    contracts: &[Contract],
    enriched: &[ContractWithDetails],
    clients: &[Client],
    positions: &[Position],
    professionals: &[Professional],
) -> DashboardMetrics {
    let active: Vec<&ContractWithDetails> = enriched
        .iter()
        .filter(|c| c.status != crate::types::ContractStatus::Expired)
        .collect();

    let revenue_at_risk = |days: u32| -> f64 {
        enriched
            .iter()
            .filter(|c| c.status.expiring_within(days))
            .map(|c| c.contract.monthly_value)
            .sum()
    };

    DashboardMetrics {
        total_contracts: contracts.len(),
        active_contracts: active.len(),
        total_clients: clients.len(),
        total_professionals: professionals.len(),
        total_positions: positions.len(),
        filled_positions: positions
            .iter()
            .filter(|p| p.status == PositionStatus::Filled)
            .count(),
        open_positions: positions
            .iter()
            .filter(|p| p.status == PositionStatus::Open)
            .count(),
        monthly_revenue: active.iter().map(|c| c.contract.monthly_value).sum(),
        revenue_at_risk_30: revenue_at_risk(30),
        revenue_at_risk_60: revenue_at_risk(60),
        revenue_at_risk_90: revenue_at_risk(90),
    }
}

/// Bucket contracts into the 30/60/90-day expiration cohorts.
///
/// Cohorts follow the same cumulative rule as revenue-at-risk. The
/// involved-professional count walks grouped contracts → their positions →
/// the allocations still active today (effective end date ≥ `today`,
/// position fallback applied) → distinct professionals.
pub fn expiring_contract_groups(
    enriched: &[ContractWithDetails],
    allocations: &[Allocation],
    positions: &[Position],
    today: NaiveDate,
) -> Vec<ExpiringContractsGroup> {
    RISK_WINDOWS
        .iter()
        .map(|&days| {
            let grouped: Vec<ContractWithDetails> = enriched
                .iter()
                .filter(|c| c.status.expiring_within(days))
                .cloned()
                .collect();

            let client_ids: HashSet<&str> = grouped
                .iter()
                .map(|c| c.contract.client_id.as_str())
                .collect();
            let position_ids: HashSet<&str> = grouped
                .iter()
                .flat_map(|c| c.positions.iter().map(|p| p.id.as_str()))
                .collect();
            let professional_ids: HashSet<&str> = allocations
                .iter()
                .filter(|a| position_ids.contains(a.position_id.as_str()))
                .filter(|a| a.is_active(by_id(positions, &a.position_id), today))
                .map(|a| a.professional_id.as_str())
                .collect();

            ExpiringContractsGroup {
                days,
                clients_affected: client_ids.len(),
                professionals_involved: professional_ids.len(),
                total_monthly_value: grouped.iter().map(|c| c.contract.monthly_value).sum(),
                contracts: grouped,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::contracts::enrich_contracts;
    use crate::types::{ContractType, ProfessionalStatus, WorkMode};
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client(id: &str) -> Client {
        Client {
            id: id.to_string(),
            name: format!("Client {}", id),
            tax_id: "22.222.222/0001-22".to_string(),
            contact: "contact@example.com".to_string(),
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn contract(id: &str, client_id: &str, end: NaiveDate, monthly_value: f64) -> Contract {
        Contract {
            id: id.to_string(),
            client_id: client_id.to_string(),
            contract_number: format!("CTR-{}", id),
            project_name: None,
            contract_type: ContractType::Staffing,
            start_date: date(2024, 1, 1),
            end_date: end,
            monthly_value,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn position(id: &str, contract_id: &str, end: NaiveDate) -> Position {
        Position {
            id: id.to_string(),
            contract_id: contract_id.to_string(),
            title: "Developer".to_string(),
            stack_id: "stack-1".to_string(),
            seniority_id: None,
            status: PositionStatus::Filled,
            start_date: date(2024, 1, 1),
            end_date: end,
            allocation_percentage: 100,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn professional(id: &str) -> Professional {
        Professional {
            id: id.to_string(),
            name: format!("Professional {}", id),
            email: None,
            general_seniority_id: None,
            stack_experiences: Vec::new(),
            status: ProfessionalStatus::Allocated,
            work_mode: WorkMode::Allocation,
            leader_id: None,
            total_years_experience: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn allocation(id: &str, professional_id: &str, position_id: &str) -> Allocation {
        Allocation {
            id: id.to_string(),
            professional_id: professional_id.to_string(),
            position_id: position_id.to_string(),
            start_date: date(2024, 6, 1),
            end_date: None,
            allocation_percentage: 100,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// today = 2025-01-01; contract A ends 20 days out, B 50 days out.
    fn scenario() -> (NaiveDate, Vec<Client>, Vec<Contract>) {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1"), client("client-2")];
        let contracts = vec![
            contract("a", "client-1", date(2025, 1, 20), 85_000.0),
            contract("b", "client-2", date(2025, 2, 20), 42_000.0),
        ];
        (today, clients, contracts)
    }

    #[test]
    fn revenue_at_risk_bands_are_cumulative() {
        let (today, clients, contracts) = scenario();
        let enriched = enrich_contracts(&contracts, &clients, &[], today);
        let metrics = dashboard_metrics(&contracts, &enriched, &clients, &[], &[]);

        assert_eq!(metrics.revenue_at_risk_30, 85_000.0);
        assert_eq!(metrics.revenue_at_risk_60, 127_000.0);
        assert_eq!(metrics.revenue_at_risk_90, 127_000.0);
        // Both contracts are still live, so both contribute to revenue.
        assert_eq!(metrics.monthly_revenue, 127_000.0);
        assert_eq!(metrics.active_contracts, 2);
    }

    #[test]
    fn expired_contracts_leave_revenue_but_stay_in_totals() {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1")];
        let contracts = vec![
            contract("live", "client-1", date(2025, 6, 1), 60_000.0),
            contract("dead", "client-1", date(2024, 11, 1), 45_000.0),
        ];
        let enriched = enrich_contracts(&contracts, &clients, &[], today);
        let metrics = dashboard_metrics(&contracts, &enriched, &clients, &[], &[]);

        assert_eq!(metrics.total_contracts, 2);
        assert_eq!(metrics.active_contracts, 1);
        assert_eq!(metrics.monthly_revenue, 60_000.0);
        assert_eq!(metrics.revenue_at_risk_90, 0.0);
    }

    #[test]
    fn metrics_are_idempotent_for_identical_inputs() {
        let (today, clients, contracts) = scenario();
        let positions = vec![position("pos-1", "a", date(2025, 1, 20))];
        let professionals = vec![professional("prof-1")];
        let enriched = enrich_contracts(&contracts, &clients, &positions, today);

        let first = dashboard_metrics(&contracts, &enriched, &clients, &positions, &professionals);
        let second = dashboard_metrics(&contracts, &enriched, &clients, &positions, &professionals);
        assert_eq!(first, second);
    }

    #[test]
    fn expiration_groups_count_distinct_clients_and_professionals() {
        let (today, clients, contracts) = scenario();
        let positions = vec![
            position("pos-a1", "a", date(2025, 1, 20)),
            position("pos-a2", "a", date(2025, 1, 20)),
            position("pos-b1", "b", date(2025, 2, 20)),
        ];
        // Same professional on two positions of contract A; distinct count is 1.
        let allocations = vec![
            allocation("al-1", "prof-1", "pos-a1"),
            allocation("al-2", "prof-1", "pos-a2"),
            allocation("al-3", "prof-2", "pos-b1"),
        ];
        let enriched = enrich_contracts(&contracts, &clients, &positions, today);
        let groups = expiring_contract_groups(&enriched, &allocations, &positions, today);

        assert_eq!(groups.len(), 3);
        let g30 = &groups[0];
        assert_eq!(g30.days, 30);
        assert_eq!(g30.contracts.len(), 1);
        assert_eq!(g30.clients_affected, 1);
        assert_eq!(g30.professionals_involved, 1);
        assert_eq!(g30.total_monthly_value, 85_000.0);

        let g60 = &groups[1];
        assert_eq!(g60.contracts.len(), 2);
        assert_eq!(g60.clients_affected, 2);
        assert_eq!(g60.professionals_involved, 2);
        assert_eq!(g60.total_monthly_value, 127_000.0);
    }

    #[test]
    fn inactive_allocations_do_not_count_as_involved() {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1")];
        let contracts = vec![contract("a", "client-1", date(2025, 1, 20), 85_000.0)];
        let positions = vec![position("pos-a1", "a", date(2025, 1, 20))];
        // Allocation ended last year; the professional already rolled off.
        let mut ended = allocation("al-1", "prof-1", "pos-a1");
        ended.end_date = Some(date(2024, 12, 1));
        let enriched = enrich_contracts(&contracts, &clients, &positions, today);
        let groups = expiring_contract_groups(&enriched, &[ended], &positions, today);

        assert_eq!(groups[0].professionals_involved, 0);
    }
}
