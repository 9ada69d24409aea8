//! # childtree HTTP Server Module
//!
//! Serves both record stores over JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/{bst,avl}/children` - Create and list records
//! - `/{bst,avl}/children/:document` - Read, update, delete one record
//! - `/{bst,avl}/children/tree/info` - Tree shape
//! - `/{bst,avl}/reports/children-by-city` - Per-city head count
//! - `/{bst,avl}/metrics` - Store counters

pub mod children_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use children_routes::{children_routes, StoreState};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
