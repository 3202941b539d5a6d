pub mod bug_handlers;
pub mod health_handlers;
