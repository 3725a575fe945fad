//! Domain layer containing business entities, storage contracts and the
//! retention sweeper.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`retention_sweeper`] - Background purge of expired records
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; storage backends implement [`repositories::RecordStore`] in
//! `crate::infrastructure::persistence`.

pub mod entities;
pub mod repositories;
pub mod retention_sweeper;
