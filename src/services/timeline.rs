// Timeline service — converts allocations into window-clipped segments
// for Gantt-style rendering. Purely presentational transforms; nothing
// here mutates or caches.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::lookup::{self, by_id};
use crate::types::{
    Allocation, AllocationTimelineEntry, Client, Contract, FactoryGanttEntry, Position,
    Professional, Stack, StackCategory,
};

/// Display window for a timeline, month-aligned on both ends.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One calendar month's share of the window header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSpan {
    pub label: String,
    pub days: i64,
    pub start_day: i64,
}

/// An item clipped into a window. `duration_days` never goes below 1 so
/// degenerate ranges still get a visible bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedSpan {
    pub effective_start: NaiveDate,
    pub effective_end: NaiveDate,
    pub start_offset_days: i64,
    pub duration_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    #[serde(flatten)]
    pub entry: AllocationTimelineEntry,
    #[serde(flatten)]
    pub span: ClippedSpan,
}

/// Per-professional timeline row. A row survives even when every segment
/// clips out of the window; the caller decides whether to render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalTimeline {
    pub professional_id: String,
    pub professional_name: String,
    pub segments: Vec<TimelineSegment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedGanttEntry {
    #[serde(flatten)]
    pub entry: FactoryGanttEntry,
    #[serde(flatten)]
    pub span: ClippedSpan,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Months::new(1) - Duration::days(1)
}

impl TimelineWindow {
    /// Window spanning `months` whole calendar months starting with the
    /// month containing `today`.
    pub fn months_from(today: NaiveDate, months: u32) -> Self {
        let start = month_start(today);
        let end = month_end(start + Months::new(months.max(1) - 1));
        TimelineWindow { start, end }
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Month headers across the window: label, day count, and day offset
    /// from the window start.
    pub fn month_spans(&self) -> Vec<MonthSpan> {
        let mut spans = Vec::new();
        let mut current = self.start;
        let mut offset = 0i64;
        while current <= self.end {
            let span_end = month_end(current).min(self.end);
            let days = (span_end - current).num_days() + 1;
            spans.push(MonthSpan {
                label: current.format("%B %Y").to_string(),
                days,
                start_day: offset,
            });
            offset += days;
            current = month_start(current + Months::new(1));
        }
        spans
    }

    /// Clip an item into the window. `None` when the item does not overlap
    /// the window at all.
    pub fn clip(&self, item_start: NaiveDate, item_end: NaiveDate) -> Option<ClippedSpan> {
        let effective_start = item_start.max(self.start);
        let effective_end = item_end.min(self.end);
        if effective_start > self.end || effective_end < self.start {
            return None;
        }
        Some(ClippedSpan {
            effective_start,
            effective_end,
            start_offset_days: (effective_start - self.start).num_days().max(0),
            duration_days: ((effective_end - effective_start).num_days() + 1).max(1),
        })
    }
}

/// Join allocations into flat timeline entries. An entry needs its whole
/// chain (professional, position, contract, client, stack) to resolve;
/// anything with a broken link is dropped.
pub fn allocation_timeline(
    allocations: &[Allocation],
    professionals: &[Professional],
    positions: &[Position],
    contracts: &[Contract],
    clients: &[Client],
    stacks: &[Stack],
    categories: &[StackCategory],
) -> Vec<AllocationTimelineEntry> {
    allocations
        .iter()
        .filter_map(|a| {
            let professional = by_id(professionals, &a.professional_id)?;
            let position = by_id(positions, &a.position_id)?;
            let contract = by_id(contracts, &position.contract_id)?;
            let client = by_id(clients, &contract.client_id)?;
            let stack = by_id(stacks, &position.stack_id)?;
            Some(AllocationTimelineEntry {
                id: a.id.clone(),
                professional_id: a.professional_id.clone(),
                professional_name: professional.name.clone(),
                position_title: position.title.clone(),
                stack_name: stack.name.clone(),
                category_name: lookup::category_name(stacks, categories, &position.stack_id),
                client_name: client.name.clone(),
                project_name: contract.display_name().to_string(),
                contract_type: contract.contract_type,
                start_date: a.start_date,
                end_date: a.end_date.unwrap_or(position.end_date),
                allocation_percentage: a.allocation_percentage,
            })
        })
        .collect()
}

/// Group timeline entries per professional and clip each into the window.
/// Rows appear in first-seen entry order.
pub fn professional_timelines(
    entries: &[AllocationTimelineEntry],
    window: &TimelineWindow,
) -> Vec<ProfessionalTimeline> {
    let mut rows: Vec<ProfessionalTimeline> = Vec::new();
    for entry in entries {
        let idx = rows
            .iter()
            .position(|r| r.professional_id == entry.professional_id)
            .unwrap_or_else(|| {
                rows.push(ProfessionalTimeline {
                    professional_id: entry.professional_id.clone(),
                    professional_name: entry.professional_name.clone(),
                    segments: Vec::new(),
                });
                rows.len() - 1
            });
        if let Some(span) = window.clip(entry.start_date, entry.end_date) {
            rows[idx].segments.push(TimelineSegment {
                entry: entry.clone(),
                span,
            });
        }
    }
    rows
}

/// Clip factory Gantt rows into the window, dropping the invisible ones.
pub fn clip_gantt_entries(
    entries: &[FactoryGanttEntry],
    window: &TimelineWindow,
) -> Vec<ClippedGanttEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            window
                .clip(entry.start_date, entry.end_date)
                .map(|span| ClippedGanttEntry {
                    entry: entry.clone(),
                    span,
                })
        })
        .collect()
}
