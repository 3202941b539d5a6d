//! Storage and rendering services shared by all handlers.

pub mod bug_store;
pub mod template_service;
