//! Record store
//!
//! Glue between validated child records and a search tree. One store owns
//! one tree; the HTTP layer keeps one BST store and one AVL store side by
//! side.

mod errors;
mod report;
#[allow(clippy::module_inception)]
mod store;

pub use errors::{StoreError, StoreResult};
pub use report::{by_city, CityGenderReport};
pub use store::{BalancedStore, Listing, OrderedStore, RecordStore};
