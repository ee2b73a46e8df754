//! Mutable owner of the base entity collections.
//!
//! All writes go through here; the computation services only ever see
//! borrowed snapshots. The store is also where the cross-entity CRUD
//! rules live: position status flips when allocations come and go, and
//! deleting a contract or factory project takes its dependents with it.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::seed;
use crate::storage::Storage;
use crate::types::{
    Allocation, Client, Contract, FactoryAllocation, FactoryProject, GeneralSeniority, Position,
    PositionStatus, Professional, Seniority, Stack, StackCategory,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub clients: Vec<Client>,
    pub contracts: Vec<Contract>,
    pub stacks: Vec<Stack>,
    pub stack_categories: Vec<StackCategory>,
    pub seniorities: Vec<Seniority>,
    pub general_seniorities: Vec<GeneralSeniority>,
    pub positions: Vec<Position>,
    pub professionals: Vec<Professional>,
    pub allocations: Vec<Allocation>,
    pub factory_projects: Vec<FactoryProject>,
    pub factory_allocations: Vec<FactoryAllocation>,
}

macro_rules! crud {
    ($entity:ty, $field:ident, $kind:literal, $add:ident, $update:ident, $delete:ident) => {
        pub fn $add(&mut self, mut item: $entity) -> &$entity {
            item.id = new_id();
            item.created_at = Utc::now();
            self.$field.push(item);
            self.$field.last().expect("just pushed")
        }

        pub fn $update(
            &mut self,
            id: &str,
            update: impl FnOnce(&mut $entity),
        ) -> Result<(), StoreError> {
            let item = self
                .$field
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::not_found($kind, id))?;
            update(item);
            Ok(())
        }

        pub fn $delete(&mut self, id: &str) -> Result<(), StoreError> {
            let before = self.$field.len();
            self.$field.retain(|i| i.id != id);
            if self.$field.len() == before {
                return Err(StoreError::not_found($kind, id));
            }
            Ok(())
        }
    };
}

impl DataStore {
    pub fn new() -> Self {
        DataStore::default()
    }

    crud!(Client, clients, "client", add_client, update_client, delete_client);
    crud!(Stack, stacks, "stack", add_stack, update_stack, delete_stack);
    crud!(
        StackCategory,
        stack_categories,
        "stack category",
        add_stack_category,
        update_stack_category,
        delete_stack_category
    );
    crud!(
        Seniority,
        seniorities,
        "seniority",
        add_seniority,
        update_seniority,
        delete_seniority
    );
    crud!(
        GeneralSeniority,
        general_seniorities,
        "general seniority",
        add_general_seniority,
        update_general_seniority,
        delete_general_seniority
    );
    crud!(
        Position,
        positions,
        "position",
        add_position,
        update_position,
        delete_position
    );
    crud!(
        Professional,
        professionals,
        "professional",
        add_professional,
        update_professional,
        delete_professional
    );
    crud!(
        FactoryAllocation,
        factory_allocations,
        "factory allocation",
        add_factory_allocation,
        update_factory_allocation,
        delete_factory_allocation
    );

    pub fn add_contract(&mut self, mut contract: Contract) -> &Contract {
        contract.id = new_id();
        contract.created_at = Utc::now();
        self.contracts.push(contract);
        self.contracts.last().expect("just pushed")
    }

    pub fn update_contract(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut Contract),
    ) -> Result<(), StoreError> {
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("contract", id))?;
        update(contract);
        Ok(())
    }

    /// Delete a contract along with its positions and their allocations.
    pub fn delete_contract(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.contracts.len();
        self.contracts.retain(|c| c.id != id);
        if self.contracts.len() == before {
            return Err(StoreError::not_found("contract", id));
        }

        let removed_positions: Vec<String> = self
            .positions
            .iter()
            .filter(|p| p.contract_id == id)
            .map(|p| p.id.clone())
            .collect();
        self.positions.retain(|p| p.contract_id != id);
        self.allocations
            .retain(|a| !removed_positions.iter().any(|pid| *pid == a.position_id));
        if !removed_positions.is_empty() {
            log::debug!(
                "cascaded contract {} delete to {} position(s)",
                id,
                removed_positions.len()
            );
        }
        Ok(())
    }

    /// Create an allocation and mark its position filled.
    pub fn add_allocation(&mut self, mut allocation: Allocation) -> &Allocation {
        allocation.id = new_id();
        allocation.created_at = Utc::now();
        if let Some(position) = self
            .positions
            .iter_mut()
            .find(|p| p.id == allocation.position_id)
        {
            position.status = PositionStatus::Filled;
        }
        self.allocations.push(allocation);
        self.allocations.last().expect("just pushed")
    }

    pub fn update_allocation(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut Allocation),
    ) -> Result<(), StoreError> {
        let allocation = self
            .allocations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("allocation", id))?;
        update(allocation);
        Ok(())
    }

    /// Remove an allocation, reopening its position when nothing else
    /// claims it.
    pub fn delete_allocation(&mut self, id: &str) -> Result<(), StoreError> {
        let position_id = self
            .allocations
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.position_id.clone())
            .ok_or_else(|| StoreError::not_found("allocation", id))?;
        self.allocations.retain(|a| a.id != id);

        let still_claimed = self.allocations.iter().any(|a| a.position_id == position_id);
        if !still_claimed {
            if let Some(position) = self.positions.iter_mut().find(|p| p.id == position_id) {
                position.status = PositionStatus::Open;
            }
        }
        Ok(())
    }

    pub fn add_factory_project(&mut self, mut project: FactoryProject) -> &FactoryProject {
        project.id = new_id();
        project.created_at = Utc::now();
        self.factory_projects.push(project);
        self.factory_projects.last().expect("just pushed")
    }

    pub fn update_factory_project(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut FactoryProject),
    ) -> Result<(), StoreError> {
        let project = self
            .factory_projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("factory project", id))?;
        update(project);
        Ok(())
    }

    /// Delete a factory project along with its allocations.
    pub fn delete_factory_project(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.factory_projects.len();
        self.factory_projects.retain(|p| p.id != id);
        if self.factory_projects.len() == before {
            return Err(StoreError::not_found("factory project", id));
        }
        self.factory_allocations.retain(|a| a.project_id != id);
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Load every collection from storage, seeding any that has never been
    /// written. `seed_anchor` fixes the seed data's relative dates.
    pub fn load_or_seed(storage: &Storage, seed_anchor: NaiveDate) -> Result<Self, StoreError> {
        storage.ensure_schema()?;
        let defaults = seed::seed_store(seed_anchor);

        macro_rules! load {
            ($name:literal, $default:expr) => {
                storage.load_collection($name)?.unwrap_or($default)
            };
        }

        Ok(DataStore {
            clients: load!("clients", defaults.clients),
            contracts: load!("contracts", defaults.contracts),
            stacks: load!("stacks", defaults.stacks),
            stack_categories: load!("stack_categories", defaults.stack_categories),
            seniorities: load!("seniorities", defaults.seniorities),
            general_seniorities: load!("general_seniorities", defaults.general_seniorities),
            positions: load!("positions", defaults.positions),
            professionals: load!("professionals", defaults.professionals),
            allocations: load!("allocations", defaults.allocations),
            factory_projects: load!("factory_projects", defaults.factory_projects),
            factory_allocations: load!("factory_allocations", defaults.factory_allocations),
        })
    }

    /// Write every collection back to storage.
    pub fn persist(&self, storage: &Storage) -> Result<(), StoreError> {
        storage.save_collection("clients", &self.clients)?;
        storage.save_collection("contracts", &self.contracts)?;
        storage.save_collection("stacks", &self.stacks)?;
        storage.save_collection("stack_categories", &self.stack_categories)?;
        storage.save_collection("seniorities", &self.seniorities)?;
        storage.save_collection("general_seniorities", &self.general_seniorities)?;
        storage.save_collection("positions", &self.positions)?;
        storage.save_collection("professionals", &self.professionals)?;
        storage.save_collection("allocations", &self.allocations)?;
        storage.save_collection("factory_projects", &self.factory_projects)?;
        storage.save_collection("factory_allocations", &self.factory_allocations)?;
        Ok(())
    }
}
