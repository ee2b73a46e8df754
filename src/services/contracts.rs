// Contracts service — enrichment joins and per-contract team rosters.

use chrono::NaiveDate;

use crate::dates::{contract_status, days_until};
use crate::lookup::{self, by_id};
use crate::types::{
    Allocation, Client, Contract, ContractWithDetails, Position, PositionStatus, Professional,
    Stack, StackCategory, TeamMember, TeamView,
};

/// Join contracts with their client and positions and attach the computed
/// lifecycle status.
///
/// A contract whose client cannot be resolved is dropped from the result.
/// That is a defensive filter against stale foreign keys, not an error.
pub fn enrich_contracts(
    contracts: &[Contract],
    clients: &[Client],
    positions: &[Position],
    today: NaiveDate,
) -> Vec<ContractWithDetails> {
    let enriched: Vec<ContractWithDetails> = contracts
        .iter()
        .filter_map(|contract| {
            let client = by_id(clients, &contract.client_id)?;
            let contract_positions = lookup::positions_by_contract(positions, &contract.id)
                .into_iter()
                .cloned()
                .collect();
            Some(ContractWithDetails {
                contract: contract.clone(),
                client: client.clone(),
                positions: contract_positions,
                status: contract_status(contract.end_date, today),
                days_until_expiration: days_until(contract.end_date, today),
            })
        })
        .collect();

    if enriched.len() < contracts.len() {
        log::debug!(
            "dropped {} contract(s) with unresolvable clients",
            contracts.len() - enriched.len()
        );
    }
    enriched
}

/// Per-contract roster: every allocation under the contract's positions,
/// resolved to a named member. Members whose professional, position, or
/// stack cannot be resolved are skipped.
pub fn team_views(
    enriched: &[ContractWithDetails],
    allocations: &[Allocation],
    professionals: &[Professional],
    positions: &[Position],
    stacks: &[Stack],
    categories: &[StackCategory],
) -> Vec<TeamView> {
    enriched
        .iter()
        .map(|contract| {
            let members: Vec<TeamMember> = allocations
                .iter()
                .filter(|a| {
                    by_id(positions, &a.position_id)
                        .is_some_and(|p| p.contract_id == contract.contract.id)
                })
                .filter_map(|a| {
                    let professional = by_id(professionals, &a.professional_id)?;
                    let position = by_id(positions, &a.position_id)?;
                    let stack = by_id(stacks, &position.stack_id)?;
                    Some(TeamMember {
                        professional_id: a.professional_id.clone(),
                        professional_name: professional.name.clone(),
                        position_title: position.title.clone(),
                        stack_name: stack.name.clone(),
                        category_name: lookup::category_name(stacks, categories, &position.stack_id),
                        start_date: a.start_date,
                        end_date: a.end_date.unwrap_or(position.end_date),
                        allocation_percentage: a.allocation_percentage,
                    })
                })
                .collect();

            TeamView {
                contract_id: contract.contract.id.clone(),
                contract_number: contract.contract.contract_number.clone(),
                project_name: contract.contract.display_name().to_string(),
                client_name: contract.client.name.clone(),
                contract_type: contract.contract.contract_type,
                start_date: contract.contract.start_date,
                end_date: contract.contract.end_date,
                status: contract.status,
                days_until_expiration: contract.days_until_expiration,
                members,
                total_positions: contract.positions.len(),
                filled_positions: contract
                    .positions
                    .iter()
                    .filter(|p| p.status == PositionStatus::Filled)
                    .count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContractStatus, ContractType};
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.to_string(),
            tax_id: "11.111.111/0001-11".to_string(),
            contact: "contact@example.com".to_string(),
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn contract(id: &str, client_id: &str, end: NaiveDate) -> Contract {
        Contract {
            id: id.to_string(),
            client_id: client_id.to_string(),
            contract_number: format!("CTR-{}", id),
            project_name: None,
            contract_type: ContractType::Staffing,
            start_date: date(2024, 1, 1),
            end_date: end,
            monthly_value: 50_000.0,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn position(id: &str, contract_id: &str, status: PositionStatus) -> Position {
        Position {
            id: id.to_string(),
            contract_id: contract_id.to_string(),
            title: "Developer".to_string(),
            stack_id: "stack-1".to_string(),
            seniority_id: None,
            status,
            start_date: date(2024, 1, 1),
            end_date: date(2025, 6, 30),
            allocation_percentage: 100,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn enrichment_attaches_client_positions_and_status() {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1", "Harbor Bank")];
        let contracts = vec![contract("c1", "client-1", date(2025, 1, 20))];
        let positions = vec![
            position("pos-1", "c1", PositionStatus::Filled),
            position("pos-2", "other", PositionStatus::Open),
        ];

        let enriched = enrich_contracts(&contracts, &clients, &positions, today);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].client.name, "Harbor Bank");
        assert_eq!(enriched[0].positions.len(), 1);
        assert_eq!(enriched[0].status, ContractStatus::Expiring30);
        assert_eq!(enriched[0].days_until_expiration, 19);
    }

    #[test]
    fn orphaned_contract_is_dropped_not_an_error() {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1", "Harbor Bank")];
        let contracts = vec![
            contract("c1", "client-1", date(2025, 5, 1)),
            contract("c2", "client-deleted", date(2025, 5, 1)),
        ];

        let enriched = enrich_contracts(&contracts, &clients, &[], today);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].contract.id, "c1");
    }

    #[test]
    fn team_view_resolves_members_through_position_chain() {
        let today = date(2025, 1, 1);
        let clients = vec![client("client-1", "Harbor Bank")];
        let contracts = vec![contract("c1", "client-1", date(2025, 6, 30))];
        let positions = vec![position("pos-1", "c1", PositionStatus::Filled)];
        let stacks = vec![Stack {
            id: "stack-1".to_string(),
            name: "React".to_string(),
            category_id: "cat-1".to_string(),
            created_at: DateTime::<Utc>::MIN_UTC,
        }];
        let categories = vec![StackCategory {
            id: "cat-1".to_string(),
            name: "Development".to_string(),
            description: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }];
        let professionals = vec![Professional {
            id: "prof-1".to_string(),
            name: "Ana Souza".to_string(),
            email: None,
            general_seniority_id: None,
            stack_experiences: Vec::new(),
            status: crate::types::ProfessionalStatus::Allocated,
            work_mode: crate::types::WorkMode::Allocation,
            leader_id: None,
            total_years_experience: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }];
        let allocations = vec![Allocation {
            id: "alloc-1".to_string(),
            professional_id: "prof-1".to_string(),
            position_id: "pos-1".to_string(),
            start_date: date(2024, 6, 1),
            end_date: None,
            allocation_percentage: 100,
            created_at: DateTime::<Utc>::MIN_UTC,
        }];

        let enriched = enrich_contracts(&contracts, &clients, &positions, today);
        let views = team_views(
            &enriched,
            &allocations,
            &professionals,
            &positions,
            &stacks,
            &categories,
        );
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].members.len(), 1);
        let member = &views[0].members[0];
        assert_eq!(member.professional_name, "Ana Souza");
        assert_eq!(member.category_name, "Development");
        // Allocation has no end date of its own, so the position's applies.
        assert_eq!(member.end_date, date(2025, 6, 30));
        assert_eq!(views[0].filled_positions, 1);
    }
}
