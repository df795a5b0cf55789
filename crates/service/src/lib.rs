//! Service layer owning persistence and the CRUD operations on top of it.
//! - `storage` holds the reusable JSON-array file store.
//! - `employees` serializes every load-mutate-save cycle behind one lock.
//! - HTTP concerns (status codes, bodies) stay out of this crate.

pub mod employees;
pub mod errors;
pub mod runtime;
pub mod storage;
