// src/db/models/mod.rs

//! Data models for backup catalog entities

mod catalog_record;

pub use catalog_record::{CatalogRecord, EntryKind, CORE_COLUMNS};
