use tracing::debug;

use vendorhub_analytics::{ProductSnapshot, ProductSource, SourceError};
use vendorhub_core::{ProductId, VendorId};

use crate::read_model::{InMemoryVendorStore, StoreError, VendorStore};

/// In-memory product listings, partitioned by vendor.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: InMemoryVendorStore<ProductId, ProductSnapshot>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a listing.
    pub fn upsert(&self, product: ProductSnapshot) -> Result<(), StoreError> {
        debug!(vendor = %product.vendor_id, product = %product.product_id, quantity = product.quantity, "product upserted");
        let vendor_id = product.vendor_id.clone();
        self.inner.upsert(&vendor_id, product.product_id.clone(), product)
    }

    pub fn get(&self, vendor_id: &VendorId, product_id: &ProductId) -> Result<Option<ProductSnapshot>, StoreError> {
        self.inner.get(vendor_id, product_id)
    }

    pub fn remove(&self, vendor_id: &VendorId, product_id: &ProductId) -> Result<Option<ProductSnapshot>, StoreError> {
        self.inner.remove(vendor_id, product_id)
    }
}

impl ProductSource for InMemoryProductStore {
    fn products_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<ProductSnapshot>, SourceError> {
        Ok(self.inner.list(vendor_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(vendor: &str, product: &str, qty: u64) -> ProductSnapshot {
        ProductSnapshot {
            product_id: ProductId::new(product).unwrap(),
            vendor_id: VendorId::new(vendor).unwrap(),
            product_name: format!("{product} listing"),
            quantity: qty,
        }
    }

    #[test]
    fn lists_only_the_vendors_products() {
        let store = InMemoryProductStore::new();
        store.upsert(snapshot("VEN-0001", "P-2", 4)).unwrap();
        store.upsert(snapshot("VEN-0001", "P-1", 7)).unwrap();
        store.upsert(snapshot("VEN-0002", "P-3", 1)).unwrap();

        let listed = store.products_for_vendor(&VendorId::new("VEN-0001").unwrap()).unwrap();
        let ids: Vec<&str> = listed.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P-1", "P-2"]);
    }

    #[test]
    fn vendor_ids_that_look_numeric_are_not_coerced() {
        let store = InMemoryProductStore::new();
        store.upsert(snapshot("0042", "P-1", 7)).unwrap();

        assert!(store.products_for_vendor(&VendorId::new("42").unwrap()).unwrap().is_empty());
        assert_eq!(store.products_for_vendor(&VendorId::new("0042").unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn upsert_replaces_stock_level() {
        let store = InMemoryProductStore::new();
        store.upsert(snapshot("VEN-1", "P-1", 7)).unwrap();
        store.upsert(snapshot("VEN-1", "P-1", 2)).unwrap();

        let vendor = VendorId::new("VEN-1").unwrap();
        let product = ProductId::new("P-1").unwrap();
        assert_eq!(store.get(&vendor, &product).unwrap().unwrap().quantity, 2);

        assert!(store.remove(&vendor, &product).unwrap().is_some());
        assert!(store.get(&vendor, &product).unwrap().is_none());
    }
}
