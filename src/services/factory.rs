// Factory service — enrichment and dashboard metrics for the software
// factory line of business. Projects carry a manually-set progress figure;
// the enrichment computes the time-elapsed progress next to it so the two
// can be compared.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::lookup::{self, by_id};
use crate::types::{
    Client, FactoryAllocation, FactoryAllocationWithDetails, FactoryDashboardMetrics,
    FactoryGanttEntry, FactoryProject, FactoryProjectStatus, FactoryProjectWithDetails,
    GanttEntryKind, Professional, Stack,
};

/// Join factory projects with their client and member allocations and
/// attach the elapsed/remaining day counts. Member allocations whose
/// professional or stack cannot be resolved are skipped.
pub fn enrich_factory_projects(
    projects: &[FactoryProject],
    factory_allocations: &[FactoryAllocation],
    clients: &[Client],
    professionals: &[Professional],
    stacks: &[Stack],
    today: NaiveDate,
) -> Vec<FactoryProjectWithDetails> {
    projects
        .iter()
        .map(|project| {
            let allocations: Vec<FactoryAllocationWithDetails> =
                lookup::allocations_by_project(factory_allocations, &project.id)
                    .into_iter()
                    .filter_map(|a| {
                        let professional = by_id(professionals, &a.professional_id)?;
                        let stack = by_id(stacks, &a.stack_id)?;
                        Some(FactoryAllocationWithDetails {
                            allocation: a.clone(),
                            professional: professional.clone(),
                            stack: stack.clone(),
                        })
                    })
                    .collect();

            let total_days = (project.end_date - project.start_date).num_days().max(1);
            let days_elapsed = (today - project.start_date).num_days().max(0);
            let days_remaining = (project.end_date - today).num_days().max(0);
            let calculated_progress =
                (days_elapsed as f64 / total_days as f64 * 100.0).min(100.0);

            FactoryProjectWithDetails {
                client: project
                    .client_id
                    .as_deref()
                    .and_then(|cid| by_id(clients, cid))
                    .cloned(),
                total_members: allocations.len(),
                allocations,
                days_remaining,
                days_elapsed,
                total_days,
                calculated_progress,
                project: project.clone(),
            }
        })
        .collect()
}

/// Distinct professionals allocated to factory work at a point in time.
fn allocated_at(factory_allocations: &[FactoryAllocation], at: NaiveDate) -> usize {
    factory_allocations
        .iter()
        .filter(|a| a.start_date <= at && a.end_date >= at)
        .map(|a| a.professional_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Headline factory figures: project status counts plus occupancy now and
/// at the 30/60/90-day horizons. Horizon occupancy is point-in-time (who
/// is still allocated on that date), distinct from the idle forecast.
pub fn factory_dashboard_metrics(
    projects: &[FactoryProject],
    factory_allocations: &[FactoryAllocation],
    professionals: &[Professional],
    today: NaiveDate,
) -> FactoryDashboardMetrics {
    let count_status = |status: FactoryProjectStatus| -> usize {
        projects.iter().filter(|p| p.status == status).count()
    };

    let pool_size = professionals
        .iter()
        .filter(|p| p.work_mode.is_factory_eligible())
        .count();

    let occupancy_at = |at: NaiveDate| -> f64 {
        if pool_size == 0 {
            0.0
        } else {
            allocated_at(factory_allocations, at) as f64 / pool_size as f64 * 100.0
        }
    };

    FactoryDashboardMetrics {
        total_projects: projects.len(),
        active_projects: count_status(FactoryProjectStatus::InProgress),
        planned_projects: count_status(FactoryProjectStatus::Planned),
        finished_projects: count_status(FactoryProjectStatus::Finished),
        paused_projects: count_status(FactoryProjectStatus::Paused),
        total_factory_professionals: pool_size,
        current_occupancy_rate: occupancy_at(today),
        occupancy_30_days: occupancy_at(today + Duration::days(30)),
        occupancy_60_days: occupancy_at(today + Duration::days(60)),
        occupancy_90_days: occupancy_at(today + Duration::days(90)),
    }
}

/// Flatten enriched projects into Gantt rows: one project bar followed by
/// a bar per member.
pub fn factory_gantt_entries(enriched: &[FactoryProjectWithDetails]) -> Vec<FactoryGanttEntry> {
    let mut entries = Vec::new();
    for detail in enriched {
        entries.push(FactoryGanttEntry {
            id: detail.project.id.clone(),
            kind: GanttEntryKind::Project,
            name: detail.project.name.clone(),
            project_id: None,
            project_name: None,
            role: None,
            stack_name: None,
            start_date: detail.project.start_date,
            end_date: detail.project.end_date,
            progress: Some(detail.project.progress_percentage),
            status: Some(detail.project.status),
        });
        for member in &detail.allocations {
            entries.push(FactoryGanttEntry {
                id: format!("{}-{}", member.allocation.id, detail.project.id),
                kind: GanttEntryKind::Professional,
                name: member.professional.name.clone(),
                project_id: Some(detail.project.id.clone()),
                project_name: Some(detail.project.name.clone()),
                role: Some(member.allocation.role),
                stack_name: Some(member.stack.name.clone()),
                start_date: member.allocation.start_date,
                end_date: member.allocation.end_date,
                progress: None,
                status: None,
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FactoryRole, ProfessionalStatus, StackExperience, WorkMode};
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 1, 1)
    }

    fn project(id: &str, start: NaiveDate, end: NaiveDate, status: FactoryProjectStatus) -> FactoryProject {
        FactoryProject {
            id: id.to_string(),
            name: format!("Project {}", id),
            client_id: None,
            description: String::new(),
            start_date: start,
            end_date: end,
            status,
            progress_percentage: 35.0,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn member(id: &str, project_id: &str, professional_id: &str, start: NaiveDate, end: NaiveDate) -> FactoryAllocation {
        FactoryAllocation {
            id: id.to_string(),
            project_id: project_id.to_string(),
            professional_id: professional_id.to_string(),
            role: FactoryRole::Dev,
            stack_id: "stack-1".to_string(),
            start_date: start,
            end_date: end,
            allocation_percentage: 100,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn professional(id: &str, work_mode: WorkMode) -> Professional {
        Professional {
            id: id.to_string(),
            name: format!("Professional {}", id),
            email: None,
            general_seniority_id: None,
            stack_experiences: vec![StackExperience {
                stack_id: "stack-1".to_string(),
                years_experience: 3,
            }],
            status: ProfessionalStatus::Allocated,
            work_mode,
            leader_id: None,
            total_years_experience: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    fn stack() -> Stack {
        Stack {
            id: "stack-1".to_string(),
            name: "Python".to_string(),
            category_id: "cat-1".to_string(),
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn elapsed_progress_tracks_the_calendar_not_the_manual_figure() {
        // 100-day project, 25 days in.
        let projects = vec![project(
            "p1",
            date(2024, 12, 7),
            date(2025, 3, 17),
            FactoryProjectStatus::InProgress,
        )];
        let enriched = enrich_factory_projects(&projects, &[], &[], &[], &[], today());
        let detail = &enriched[0];
        assert_eq!(detail.total_days, 100);
        assert_eq!(detail.days_elapsed, 25);
        assert_eq!(detail.days_remaining, 75);
        assert_eq!(detail.calculated_progress, 25.0);
        // Manual figure rides along untouched.
        assert_eq!(detail.project.progress_percentage, 35.0);
    }

    #[test]
    fn elapsed_progress_caps_at_one_hundred() {
        let projects = vec![project(
            "p1",
            date(2024, 1, 1),
            date(2024, 3, 1),
            FactoryProjectStatus::Finished,
        )];
        let enriched = enrich_factory_projects(&projects, &[], &[], &[], &[], today());
        assert_eq!(enriched[0].calculated_progress, 100.0);
        assert_eq!(enriched[0].days_remaining, 0);
    }

    #[test]
    fn degenerate_project_dates_keep_a_one_day_floor() {
        let projects = vec![project(
            "p1",
            date(2025, 2, 1),
            date(2025, 2, 1),
            FactoryProjectStatus::Planned,
        )];
        let enriched = enrich_factory_projects(&projects, &[], &[], &[], &[], today());
        assert_eq!(enriched[0].total_days, 1);
        assert_eq!(enriched[0].days_elapsed, 0);
        assert_eq!(enriched[0].calculated_progress, 0.0);
    }

    #[test]
    fn metrics_count_statuses_and_horizon_occupancy() {
        let projects = vec![
            project("p1", date(2024, 10, 1), date(2025, 3, 1), FactoryProjectStatus::InProgress),
            project("p2", date(2025, 2, 1), date(2025, 6, 1), FactoryProjectStatus::Planned),
            project("p3", date(2024, 5, 1), date(2024, 11, 1), FactoryProjectStatus::Finished),
        ];
        let professionals = vec![
            professional("prof-1", WorkMode::Factory),
            professional("prof-2", WorkMode::Both),
            professional("prof-3", WorkMode::Allocation),
        ];
        // prof-1 allocated through Jan 20; prof-2 through May.
        let allocations = vec![
            member("fal-1", "p1", "prof-1", date(2024, 10, 1), date(2025, 1, 20)),
            member("fal-2", "p1", "prof-2", date(2024, 10, 1), date(2025, 5, 1)),
        ];

        let metrics = factory_dashboard_metrics(&projects, &allocations, &professionals, today());
        assert_eq!(metrics.total_projects, 3);
        assert_eq!(metrics.active_projects, 1);
        assert_eq!(metrics.planned_projects, 1);
        assert_eq!(metrics.finished_projects, 1);
        assert_eq!(metrics.paused_projects, 0);
        assert_eq!(metrics.total_factory_professionals, 2);
        assert_eq!(metrics.current_occupancy_rate, 100.0);
        // 30 days out prof-1 has rolled off.
        assert_eq!(metrics.occupancy_30_days, 50.0);
        assert_eq!(metrics.occupancy_90_days, 50.0);
    }

    #[test]
    fn metrics_with_empty_pool_stay_at_zero() {
        let metrics = factory_dashboard_metrics(&[], &[], &[], today());
        assert_eq!(metrics.current_occupancy_rate, 0.0);
        assert_eq!(metrics.occupancy_60_days, 0.0);
    }

    #[test]
    fn gantt_rows_pair_each_project_with_its_members() {
        let projects = vec![project(
            "p1",
            date(2024, 10, 1),
            date(2025, 3, 1),
            FactoryProjectStatus::InProgress,
        )];
        let professionals = vec![professional("prof-1", WorkMode::Factory)];
        let allocations = vec![member(
            "fal-1",
            "p1",
            "prof-1",
            date(2024, 10, 1),
            date(2025, 2, 1),
        )];
        let enriched = enrich_factory_projects(
            &projects,
            &allocations,
            &[],
            &professionals,
            &[stack()],
            today(),
        );
        let entries = factory_gantt_entries(&enriched);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, GanttEntryKind::Project);
        assert_eq!(entries[0].progress, Some(35.0));
        assert_eq!(entries[1].kind, GanttEntryKind::Professional);
        assert_eq!(entries[1].project_name.as_deref(), Some("Project p1"));
        assert_eq!(entries[1].stack_name.as_deref(), Some("Python"));
    }
}
