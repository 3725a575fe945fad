//! Record store implementations.
//!
//! - [`PgRecordStore`] - PostgreSQL via SQLx
//! - [`MemoryRecordStore`] - in-process map for local runs and tests

pub mod memory_record_store;
pub mod pg_record_store;

pub use memory_record_store::MemoryRecordStore;
pub use pg_record_store::PgRecordStore;
