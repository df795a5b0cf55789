//! Storage abstractions for the service layer
//!
//! Holds the whole-collection JSON file store. Callers are responsible for
//! mutual exclusion; nothing in here takes the collection lock.

pub mod json_list_store;
