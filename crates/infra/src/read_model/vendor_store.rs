use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use vendorhub_analytics::SourceError;
use vendorhub_core::VendorId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("stale write (expected version {expected}, found {actual})")]
    Concurrency { expected: u64, actual: u64 },
}

impl From<StoreError> for SourceError {
    fn from(value: StoreError) -> Self {
        SourceError::Unavailable(value.to_string())
    }
}

/// Vendor-isolated key/value store.
///
/// Vendor ids are used as-is for partitioning; two ids that differ in any byte
/// are different vendors.
pub trait VendorStore<K, V>: Send + Sync {
    fn get(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError>;
    fn upsert(&self, vendor_id: &VendorId, key: K, value: V) -> Result<(), StoreError>;
    fn remove(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError>;
    /// All values of one vendor, ordered by key.
    fn list(&self, vendor_id: &VendorId) -> Result<Vec<V>, StoreError>;
}

impl<K, V, S> VendorStore<K, V> for Arc<S>
where
    S: VendorStore<K, V> + ?Sized,
{
    fn get(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError> {
        (**self).get(vendor_id, key)
    }

    fn upsert(&self, vendor_id: &VendorId, key: K, value: V) -> Result<(), StoreError> {
        (**self).upsert(vendor_id, key, value)
    }

    fn remove(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError> {
        (**self).remove(vendor_id, key)
    }

    fn list(&self, vendor_id: &VendorId) -> Result<Vec<V>, StoreError> {
        (**self).list(vendor_id)
    }
}

/// In-memory vendor-isolated store for tests/dev.
#[derive(Debug)]
pub struct InMemoryVendorStore<K, V> {
    inner: RwLock<BTreeMap<VendorId, BTreeMap<K, V>>>,
}

impl<K, V> InMemoryVendorStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryVendorStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> VendorStore<K, V> for InMemoryVendorStore<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned("vendor store"))?;
        Ok(map.get(vendor_id).and_then(|m| m.get(key)).cloned())
    }

    fn upsert(&self, vendor_id: &VendorId, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned("vendor store"))?;
        map.entry(vendor_id.clone()).or_default().insert(key, value);
        Ok(())
    }

    fn remove(&self, vendor_id: &VendorId, key: &K) -> Result<Option<V>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::LockPoisoned("vendor store"))?;
        Ok(map.get_mut(vendor_id).and_then(|m| m.remove(key)))
    }

    fn list(&self, vendor_id: &VendorId) -> Result<Vec<V>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned("vendor store"))?;
        Ok(map
            .get(vendor_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(id: &str) -> VendorId {
        VendorId::new(id).unwrap()
    }

    #[test]
    fn vendors_are_isolated() {
        let store: InMemoryVendorStore<u32, &'static str> = InMemoryVendorStore::new();
        store.upsert(&vendor("VEN-1"), 1, "one").unwrap();
        store.upsert(&vendor("VEN-2"), 1, "uno").unwrap();

        assert_eq!(store.get(&vendor("VEN-1"), &1).unwrap(), Some("one"));
        assert_eq!(store.get(&vendor("VEN-2"), &1).unwrap(), Some("uno"));
        assert_eq!(store.list(&vendor("VEN-3")).unwrap(), Vec::<&str>::new());
    }

    #[test]
    fn list_is_ordered_by_key() {
        let store: InMemoryVendorStore<u32, u32> = InMemoryVendorStore::new();
        for k in [3, 1, 2] {
            store.upsert(&vendor("VEN-1"), k, k * 10).unwrap();
        }
        assert_eq!(store.list(&vendor("VEN-1")).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn upsert_overwrites_and_remove_returns_value() {
        let store: InMemoryVendorStore<u32, u32> = InMemoryVendorStore::new();
        store.upsert(&vendor("VEN-1"), 1, 1).unwrap();
        store.upsert(&vendor("VEN-1"), 1, 2).unwrap();
        assert_eq!(store.remove(&vendor("VEN-1"), &1).unwrap(), Some(2));
        assert_eq!(store.remove(&vendor("VEN-1"), &1).unwrap(), None);
    }
}
