//! Application layer services implementing business logic.
//!
//! Services validate input, then delegate every state change to a single
//! atomic [`crate::domain::repositories::RecordStore`] call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code assignment
//! - [`services::redirect_service::RedirectService`] - Redirects, inspection and removal

pub mod services;
