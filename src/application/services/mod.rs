//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;

pub use link_service::{Assignment, LinkService};
pub use redirect_service::RedirectService;
