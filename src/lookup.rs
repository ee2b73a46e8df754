//! Indexed lookups and foreign-key filters over the flat collections.
//!
//! Collections are small (tens to low hundreds of entities), so linear
//! scans are fine and nothing here caches. Lookups return `Option` rather
//! than failing: hand-entered data may carry stale foreign keys, and the
//! computation layer is expected to tolerate them.

use crate::types::{
    Allocation, Client, Contract, FactoryAllocation, FactoryProject, GeneralSeniority, Position,
    Professional, Seniority, Stack, StackCategory,
};

/// Anything addressable by its string id.
pub trait Keyed {
    fn id(&self) -> &str;
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_keyed!(
    Client,
    Contract,
    Position,
    Professional,
    Allocation,
    FactoryProject,
    FactoryAllocation,
    Stack,
    StackCategory,
    Seniority,
    GeneralSeniority,
);

/// Find an entity by id. `None` for unknown ids, never a panic.
pub fn by_id<'a, T: Keyed>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Filter a collection by an arbitrary predicate.
pub fn filter<'a, T>(items: &'a [T], pred: impl Fn(&T) -> bool + 'a) -> impl Iterator<Item = &'a T> {
    items.iter().filter(move |item| pred(item))
}

pub fn positions_by_contract<'a>(positions: &'a [Position], contract_id: &'a str) -> Vec<&'a Position> {
    filter(positions, move |p| p.contract_id == contract_id).collect()
}

pub fn allocations_by_position<'a>(
    allocations: &'a [Allocation],
    position_id: &'a str,
) -> Vec<&'a Allocation> {
    filter(allocations, move |a| a.position_id == position_id).collect()
}

pub fn allocations_by_project<'a>(
    allocations: &'a [FactoryAllocation],
    project_id: &'a str,
) -> Vec<&'a FactoryAllocation> {
    filter(allocations, move |a| a.project_id == project_id).collect()
}

/// Resolve a stack name, degrading to an empty string for stale ids.
pub fn stack_name(stacks: &[Stack], stack_id: &str) -> String {
    by_id(stacks, stack_id)
        .map(|s| s.name.clone())
        .unwrap_or_default()
}

/// Resolve a stack's category name through the taxonomy, degrading to an
/// empty string when either hop is stale.
pub fn category_name(stacks: &[Stack], categories: &[StackCategory], stack_id: &str) -> String {
    by_id(stacks, stack_id)
        .and_then(|s| by_id(categories, &s.category_id))
        .map(|c| c.name.clone())
        .unwrap_or_default()
}
