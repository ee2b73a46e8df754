// Reports service — secondary groupings for the admin views: stack
// distribution, per-client rollups, and per-leader team splits.

use crate::lookup::by_id;
use crate::types::{
    Client, ClientSummary, ContractStatus, ContractWithDetails, LeaderMetrics, Position,
    PositionStatus, Professional, ProfessionalStatus, Stack, StackCategory, StackDistribution,
};

/// Per-stack counts: positions requiring the stack, how many are filled,
/// and how many professionals carry experience in it.
pub fn stack_distributions(
    stacks: &[Stack],
    categories: &[StackCategory],
    positions: &[Position],
    professionals: &[Professional],
) -> Vec<StackDistribution> {
    stacks
        .iter()
        .map(|stack| {
            let stack_positions: Vec<&Position> = positions
                .iter()
                .filter(|p| p.stack_id == stack.id)
                .collect();
            StackDistribution {
                stack_id: stack.id.clone(),
                stack_name: stack.name.clone(),
                category_id: stack.category_id.clone(),
                category_name: by_id(categories, &stack.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                professional_count: professionals
                    .iter()
                    .filter(|p| {
                        p.stack_experiences
                            .iter()
                            .any(|exp| exp.stack_id == stack.id)
                    })
                    .count(),
                position_count: stack_positions.len(),
                filled_positions: stack_positions
                    .iter()
                    .filter(|p| p.status == PositionStatus::Filled)
                    .count(),
            }
        })
        .collect()
}

/// Per-client rollup over the non-expired enriched contracts.
pub fn client_summaries(
    clients: &[Client],
    enriched: &[ContractWithDetails],
) -> Vec<ClientSummary> {
    clients
        .iter()
        .map(|client| {
            let client_contracts: Vec<&ContractWithDetails> = enriched
                .iter()
                .filter(|c| c.contract.client_id == client.id && c.status != ContractStatus::Expired)
                .collect();
            let client_positions: Vec<&Position> = client_contracts
                .iter()
                .flat_map(|c| c.positions.iter())
                .collect();
            ClientSummary {
                client: client.clone(),
                active_contracts: client_contracts.len(),
                total_positions: client_positions.len(),
                filled_positions: client_positions
                    .iter()
                    .filter(|p| p.status == PositionStatus::Filled)
                    .count(),
                total_monthly_value: client_contracts
                    .iter()
                    .map(|c| c.contract.monthly_value)
                    .sum(),
            }
        })
        .collect()
}

/// Group professionals under their leaders. Direct reports only; the
/// leader relation is a plain foreign key, not a traversed hierarchy.
/// Leaders appear in collection order; stale leader ids produce no group.
pub fn leader_metrics(professionals: &[Professional]) -> Vec<LeaderMetrics> {
    professionals
        .iter()
        .filter(|leader| {
            professionals
                .iter()
                .any(|p| p.leader_id.as_deref() == Some(leader.id.as_str()))
        })
        .map(|leader| {
            let reports: Vec<Professional> = professionals
                .iter()
                .filter(|p| p.leader_id.as_deref() == Some(leader.id.as_str()))
                .cloned()
                .collect();
            LeaderMetrics {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                total_professionals: reports.len(),
                allocated_professionals: reports
                    .iter()
                    .filter(|p| p.status == ProfessionalStatus::Allocated)
                    .count(),
                idle_professionals: reports
                    .iter()
                    .filter(|p| p.status == ProfessionalStatus::Idle)
                    .count(),
                professionals: reports,
            }
        })
        .collect()
}
