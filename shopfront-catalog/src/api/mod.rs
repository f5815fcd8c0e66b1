//! HTTP API for shopfront-catalog
//!
//! Per-concern routers merged into the application router by
//! `build_router`. All handlers return [`crate::ApiResult`] so errors
//! map uniformly onto JSON error bodies.

mod catalog;
mod categories;
mod health;
mod items;
mod sse;

pub use catalog::catalog_routes;
pub use categories::category_routes;
pub use health::health_routes;
pub use items::item_routes;
pub use sse::event_stream;
