use std::{path::PathBuf, sync::Arc};

use tokio::sync::Mutex;

use models::{next_id, Employee, EmployeeCreate, EmployeeUpdate};

use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

const ENTITY: &str = "employee";

/// File-backed employee collection.
///
/// Every operation reloads the collection from disk, mutates it in memory
/// and rewrites the file, all inside one critical section held by the
/// store-wide lock. Serializing the full load-mutate-save span is what
/// keeps concurrent writers from losing updates and from handing out
/// duplicate ids.
pub struct EmployeeStore {
    file: JsonListStore<Employee>,
    lock: Mutex<()>,
}

impl EmployeeStore {
    /// Open the store at the given backing-file path. Creates the file on
    /// first use.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file = JsonListStore::new(path).await?;
        Ok(Arc::new(Self { file, lock: Mutex::new(()) }))
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.file.load().await
    }

    /// First record with a matching id.
    pub async fn get(&self, id: u64) -> Result<Employee, ServiceError> {
        let records = {
            let _guard = self.lock.lock().await;
            self.file.load().await?
        };
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// Append a new record with a store-assigned id and persist.
    pub async fn create(&self, payload: EmployeeCreate) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut records = self.file.load().await?;
        let employee = Employee::from_create(next_id(&records), payload);
        records.push(employee.clone());
        self.file.save(&records).await?;
        Ok(employee)
    }

    /// Merge supplied fields into the record and persist; absent or null
    /// fields keep their prior values.
    pub async fn update(&self, id: u64, payload: EmployeeUpdate) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut records = self.file.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        records[pos].merge(payload);
        let updated = records[pos].clone();
        self.file.save(&records).await?;
        Ok(updated)
    }

    /// Remove the record and persist; returns the pre-removal snapshot.
    pub async fn delete(&self, id: u64) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut records = self.file.load().await?;
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        let removed = records.remove(pos);
        self.file.save(&records).await?;
        Ok(removed)
    }
}
