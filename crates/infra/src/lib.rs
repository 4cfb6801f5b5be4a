//! Infrastructure layer: storage adapters behind the domain boundary traits.
//!
//! Everything here is in-memory; the order and product stores stand in for
//! the marketplace's document store.

pub mod connections;
pub mod orders;
pub mod products;
pub mod read_model;

pub use connections::{ConnectionService, ConnectionServiceError, InMemoryConnectionStore};
pub use orders::InMemoryOrderStore;
pub use products::InMemoryProductStore;
pub use read_model::{InMemoryVendorStore, StoreError, VendorStore};
