//! Shared types and utilities for the Shopfront catalog service
//!
//! Provides the catalog data model (items, categories, snapshots), the
//! common error taxonomy, configuration resolution, and the event bus
//! used to notify UI subscribers of snapshot changes.

pub mod config;
pub mod error;
pub mod events;
pub mod model;

pub use error::{Error, Result};
