//! Vendor-isolated storage abstractions.

pub mod vendor_store;

pub use vendor_store::{InMemoryVendorStore, StoreError, VendorStore};
