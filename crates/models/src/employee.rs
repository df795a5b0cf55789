use serde::{Deserialize, Serialize};

/// One employee record as persisted in the backing file and returned over
/// the API. `email` is serialized as an explicit JSON `null` when absent,
/// never omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned, immutable, unique within the collection.
    pub id: u64,
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: Option<String>,
}

/// Create payload. The id is never client-supplied; the store assigns it.
#[derive(Clone, Debug, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub role: String,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial-update payload. Every field is independently optional; a field
/// that is absent or explicitly `null` keeps its prior value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.department.is_none() && self.email.is_none()
    }
}

impl Employee {
    pub fn from_create(id: u64, payload: EmployeeCreate) -> Self {
        Self {
            id,
            name: payload.name,
            role: payload.role,
            department: payload.department,
            email: payload.email,
        }
    }

    /// Apply a partial update in place. Only supplied fields overwrite; the
    /// id is untouched.
    pub fn merge(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }
}

/// Next id for a new record: max existing + 1, or 1 when the collection is
/// empty. Deleting the record with the maximum id frees that value for the
/// next create; lower freed ids are never reassigned.
pub fn next_id(records: &[Employee]) -> u64 {
    records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
}
