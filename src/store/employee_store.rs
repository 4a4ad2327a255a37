//! Persisted employee store.
//!
//! Holds the ordered employee list in memory and mirrors every mutation to a
//! [`KeyValueStorage`] before notifying subscribers. Write failures are
//! logged and swallowed: the in-memory state stays authoritative and the next
//! successful write reconciles storage.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::storage::KeyValueStorage;
use crate::error::StorageError;
use crate::model::{Employee, EmployeeDraft};
use crate::observer::{Observers, Subscription};

/// Storage key of the serialized store state
pub const STORAGE_KEY: &str = "employees-store:v1";

/// Snapshot handed to subscribers and written to storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    pub employees: Vec<Employee>,
}

/// The built-in sample dataset used when storage holds nothing usable
pub fn default_employees() -> Vec<Employee> {
    let embedded = include_str!("../../resources/seed/employees.json");
    match serde_json::from_str(embedded) {
        Ok(employees) => employees,
        Err(e) => {
            log::warn!("Failed to parse embedded seed data: {}. Starting empty.", e);
            Vec::new()
        }
    }
}

/// Employee collection with write-through persistence and change notification
pub struct EmployeeStore<S: KeyValueStorage> {
    storage: S,
    state: StoreState,
    subscribers: Observers<StoreState>,
}

impl<S: KeyValueStorage + fmt::Debug> fmt::Debug for EmployeeStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeStore")
            .field("storage", &self.storage)
            .field("employees", &self.state.employees.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S: KeyValueStorage> EmployeeStore<S> {
    /// Load the store from `storage`, seeding it with the default dataset
    /// when the stored value is absent or unreadable
    pub fn open(storage: S) -> Self {
        Self::open_with_seed(storage, default_employees)
    }

    /// Like [`EmployeeStore::open`] with a caller-supplied seed
    pub fn open_with_seed<F>(storage: S, seed: F) -> Self
    where
        F: FnOnce() -> Vec<Employee>,
    {
        let mut store = Self {
            storage,
            state: StoreState::default(),
            subscribers: Observers::new(),
        };

        match store.read() {
            Some(state) => {
                log::debug!("Loaded {} employee(s) from storage", state.employees.len());
                store.state = state;
            }
            None => {
                store.state = StoreState { employees: seed() };
                log::info!(
                    "Seeded storage with {} default employee(s)",
                    store.state.employees.len()
                );
                store.write();
            }
        }

        store
    }

    fn read(&self) -> Option<StoreState> {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                log::warn!("Error reading from storage: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("Stored employee data is unreadable, reseeding: {}", e);
                None
            }
        }
    }

    fn write(&mut self) {
        if let Err(e) = self.try_write() {
            log::error!("Error saving employees: {}", e);
        }
    }

    fn try_write(&mut self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.state)?;
        self.storage.set_item(STORAGE_KEY, &serialized)
    }

    fn commit(&mut self) {
        self.write();
        self.subscribers.notify(&self.state);
    }

    /// Create a record from `draft` with a fresh id, placed first
    pub fn add_employee(&mut self, draft: EmployeeDraft) -> Employee {
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if self.position_of(&candidate).is_none() {
                break candidate;
            }
        };

        let created = Employee::from_draft(id, draft);
        log::debug!("Adding employee {}", created.id);
        self.state.employees.insert(0, created.clone());
        self.commit();
        created
    }

    /// Replace the fields present in `patch` on the record with `id`.
    ///
    /// Returns `false` without writing or notifying when no record matches.
    pub fn update_employee(&mut self, id: &str, patch: &EmployeeDraft) -> bool {
        let Some(index) = self.position_of(id) else {
            log::debug!("Update skipped, no employee {}", id);
            return false;
        };

        self.state.employees[index].apply(patch);
        log::debug!("Updated employee {}", id);
        self.commit();
        true
    }

    /// Remove the record with `id`. Returns `false` when it was not present.
    pub fn delete_employee(&mut self, id: &str) -> bool {
        let Some(index) = self.position_of(id) else {
            log::debug!("Delete skipped, no employee {}", id);
            return false;
        };

        self.state.employees.remove(index);
        log::debug!("Deleted employee {}", id);
        self.commit();
        true
    }

    /// Delete each id in turn, returning how many records were removed
    pub fn delete_employees<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        ids.into_iter()
            .filter(|id| self.delete_employee(id.as_ref()))
            .count()
    }

    /// Look up a record by id, comparing textual forms so numeric ids
    /// (`7`) match stored ids (`"7"`)
    pub fn get_by_id<I: fmt::Display + ?Sized>(&self, id: &I) -> Option<&Employee> {
        let id = id.to_string();
        self.state.employees.iter().find(|e| e.id == id)
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.state.employees.iter().position(|e| e.id == id)
    }

    /// Register a listener called with the full state after every mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription<StoreState>
    where
        F: Fn(&StoreState) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Records in display order, newest first
    pub fn employees(&self) -> &[Employee] {
        &self.state.employees
    }

    pub fn len(&self) -> usize {
        self.state.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.employees.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
