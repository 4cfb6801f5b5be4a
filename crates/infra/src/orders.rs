use std::sync::RwLock;

use tracing::debug;

use vendorhub_analytics::{OrderQuery, OrderRecord, OrderSource, ProductSales, SourceError, sum_units_by_product};

use crate::read_model::StoreError;

/// Append-only in-memory order store.
///
/// Orders are immutable once recorded; the sold-units query scans and groups
/// them on every call.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, order: OrderRecord) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| StoreError::LockPoisoned("orders"))?;
        debug!(vendor = %order.vendor_id, product = %order.product_id, status = ?order.status, "order recorded");
        orders.push(order);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::LockPoisoned("orders"))?;
        Ok(orders.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl OrderSource for InMemoryOrderStore {
    fn sold_units(&self, query: &OrderQuery) -> Result<Vec<ProductSales>, SourceError> {
        let orders = self.orders.read().map_err(|_| StoreError::LockPoisoned("orders"))?;
        Ok(sum_units_by_product(orders.iter(), query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use vendorhub_analytics::OrderStatus;
    use vendorhub_core::{ProductId, VendorId};

    fn order(vendor: &str, product: &str, qty: u64, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            vendor_id: VendorId::new(vendor).unwrap(),
            product_id: ProductId::new(product).unwrap(),
            order_quantity: qty,
            created_at: Utc::now() - Duration::hours(1),
            status,
        }
    }

    #[test]
    fn sold_units_groups_accepted_orders_of_vendor() {
        let store = InMemoryOrderStore::new();
        store.record(order("VEN-1", "P-1", 2, OrderStatus::Accepted)).unwrap();
        store.record(order("VEN-1", "P-1", 3, OrderStatus::Accepted)).unwrap();
        store.record(order("VEN-1", "P-2", 9, OrderStatus::Pending)).unwrap();
        store.record(order("VEN-2", "P-1", 9, OrderStatus::Accepted)).unwrap();
        assert_eq!(store.len().unwrap(), 4);

        let q = OrderQuery::accepted_since(VendorId::new("VEN-1").unwrap(), Utc::now() - Duration::days(7));
        let sales = store.sold_units(&q).unwrap();

        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product_id.as_str(), "P-1");
        assert_eq!(sales[0].total_sold, 5);
    }
}
