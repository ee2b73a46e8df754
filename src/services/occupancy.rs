// Occupancy forecaster — projects which currently-allocated professionals
// go idle within 30/60/90 days and what that does to the occupancy rate.
//
// The staffing and factory pools share one windowing core; only the
// resolution step differs (how an assignment finds its end date, pool, and
// display names). Resolution happens once, then every window reuses the
// normalized assignments.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::dates::days_until;
use crate::lookup::{self, by_id};
use crate::services::dashboard::RISK_WINDOWS;
use crate::types::{
    Allocation, Client, Contract, FactoryAllocation, FactoryProject, IdleForecastEntry,
    OccupancyForecast, Position, Professional, Stack,
};

/// A time-bounded assignment normalized out of either pipeline. Carries
/// everything the forecast core needs, with the domain-specific joins
/// already resolved. `professional_name` stays `None` when the
/// professional reference is stale; such assignments still count toward
/// the allocated head count but produce no idle-forecast entry.
struct ResolvedAssignment {
    professional_id: String,
    professional_name: Option<String>,
    stack_name: String,
    client_name: Option<String>,
    project_name: String,
    end_date: NaiveDate,
}

/// Forecast the general staffing pool: all professionals, paired with
/// Allocation/Position. Allocations without their own end date inherit the
/// position's; if neither resolves, the allocation has no duration and is
/// ignored.
pub fn staffing_occupancy_forecasts(
    allocations: &[Allocation],
    positions: &[Position],
    contracts: &[Contract],
    clients: &[Client],
    stacks: &[Stack],
    professionals: &[Professional],
    today: NaiveDate,
) -> Vec<OccupancyForecast> {
    let assignments: Vec<ResolvedAssignment> = allocations
        .iter()
        .filter_map(|a| {
            let position = by_id(positions, &a.position_id);
            let end_date = a.effective_end_date(position)?;
            let professional = by_id(professionals, &a.professional_id);
            let contract = position.and_then(|p| by_id(contracts, &p.contract_id));
            let client = contract.and_then(|c| by_id(clients, &c.client_id));
            Some(ResolvedAssignment {
                professional_id: a.professional_id.clone(),
                professional_name: professional.map(|p| p.name.clone()),
                stack_name: professional
                    .and_then(|p| p.primary_stack_id())
                    .map(|sid| lookup::stack_name(stacks, sid))
                    .unwrap_or_default(),
                client_name: client.map(|c| c.name.clone()),
                project_name: contract
                    .map(|c| c.display_name().to_string())
                    .unwrap_or_default(),
                end_date,
            })
        })
        .collect();

    forecast_pool(&assignments, professionals.len(), today)
}

/// Forecast the factory pool: professionals with a factory-eligible work
/// mode, paired with FactoryAllocation/FactoryProject. Factory allocations
/// always carry their own end date, so there is no position fallback.
pub fn factory_occupancy_forecasts(
    factory_allocations: &[FactoryAllocation],
    factory_projects: &[FactoryProject],
    professionals: &[Professional],
    stacks: &[Stack],
    today: NaiveDate,
) -> Vec<OccupancyForecast> {
    let assignments: Vec<ResolvedAssignment> = factory_allocations
        .iter()
        .map(|a| {
            let professional = by_id(professionals, &a.professional_id);
            let project = by_id(factory_projects, &a.project_id);
            ResolvedAssignment {
                professional_id: a.professional_id.clone(),
                professional_name: professional.map(|p| p.name.clone()),
                stack_name: professional
                    .and_then(|p| p.primary_stack_id())
                    .map(|sid| lookup::stack_name(stacks, sid))
                    .unwrap_or_default(),
                client_name: None,
                project_name: project.map(|p| p.name.clone()).unwrap_or_default(),
                end_date: a.end_date,
            }
        })
        .collect();

    let pool_size = professionals
        .iter()
        .filter(|p| p.work_mode.is_factory_eligible())
        .count();

    forecast_pool(&assignments, pool_size, today)
}

/// Shared windowing core: for each window, collect the assignments ending
/// inside it, dedup per professional, and derive the resulting rate.
fn forecast_pool(
    assignments: &[ResolvedAssignment],
    pool_size: usize,
    today: NaiveDate,
) -> Vec<OccupancyForecast> {
    // Active as of now, regardless of window.
    let current_allocated = assignments
        .iter()
        .filter(|a| a.end_date >= today)
        .map(|a| a.professional_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    RISK_WINDOWS
        .iter()
        .map(|&days| {
            let cutoff = today + Duration::days(days as i64);

            // A professional can have several ending assignments; report one
            // entry per professional, keeping the soonest deadline.
            let mut entries: Vec<IdleForecastEntry> = Vec::new();
            let mut seen: HashMap<String, usize> = HashMap::new();
            for a in assignments {
                if a.end_date < today || a.end_date > cutoff {
                    continue;
                }
                let Some(name) = a.professional_name.clone() else {
                    continue;
                };
                let entry = IdleForecastEntry {
                    professional_id: a.professional_id.clone(),
                    professional_name: name,
                    stack_name: a.stack_name.clone(),
                    current_client_name: a.client_name.clone(),
                    current_project_name: a.project_name.clone(),
                    allocation_end_date: a.end_date,
                    days_until_idle: days_until(a.end_date, today),
                };
                match seen.get(&a.professional_id) {
                    Some(&idx) => {
                        if entry.days_until_idle < entries[idx].days_until_idle {
                            entries[idx] = entry;
                        }
                    }
                    None => {
                        seen.insert(a.professional_id.clone(), entries.len());
                        entries.push(entry);
                    }
                }
            }
            entries.sort_by_key(|e| e.days_until_idle);

            let predicted_idle = entries.len();
            let occupancy_rate = if pool_size == 0 {
                0.0
            } else {
                let rate = (current_allocated as f64 - predicted_idle as f64)
                    / pool_size as f64
                    * 100.0;
                rate.max(0.0)
            };

            OccupancyForecast {
                period: days,
                current_allocated,
                predicted_idle,
                predicted_idle_professionals: entries,
                occupancy_rate,
            }
        })
        .collect()
}
