//! Core data model for the bug tracker.
//!
//! A single entity, [`bug::Bug`], maps to the `bugs` table via
//! `sqlx::FromRow` and serializes into template contexts via `serde`.

pub mod bug;
