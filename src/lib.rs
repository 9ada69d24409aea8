//! childtree - child records held in a plain BST and an AVL tree
//!
//! Layers, bottom-up:
//! - `tree`: the two search trees and their shared contract
//! - `schema`: record types and validation
//! - `store`: validated CRUD, listings and reports over one tree
//! - `observability`: JSON-line logging and counters
//! - `http_server`: axum routers for both stores
//! - `cli`: `serve` and `inspect`

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
pub mod tree;
