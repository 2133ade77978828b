//! Integration tests for CineSpark
//!
//! These tests exercise the crates together: favorites surviving restarts on
//! real file storage, pagination invariants over the whole input space, and
//! catalog workflows against the offline demo provider.

#[path = "integration/favorites_persistence.rs"]
mod favorites_persistence;

#[path = "integration/pagination_properties.rs"]
mod pagination_properties;

#[path = "integration/catalog_workflow.rs"]
mod catalog_workflow;
