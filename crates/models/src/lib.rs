//! Entity definitions shared by the service and HTTP layers.

pub mod employee;

pub use employee::{next_id, Employee, EmployeeCreate, EmployeeUpdate};
