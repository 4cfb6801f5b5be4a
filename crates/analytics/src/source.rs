//! Read-only collaborator boundary.
//!
//! Storage lives outside this crate. Implementations must either return the
//! complete result for a query or fail; truncated or paginated answers are not
//! allowed within a single call.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use vendorhub_core::{ProductId, VendorId};

use crate::model::{OrderRecord, OrderStatus, ProductSales, ProductSnapshot};

/// Failure reported by a storage collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query timed out: {0}")]
    Timeout(String),
}

/// Selection used for the sold-units query: equality on vendor and status,
/// lower bound (inclusive) on creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub vendor_id: VendorId,
    pub status: OrderStatus,
    pub created_since: DateTime<Utc>,
}

impl OrderQuery {
    pub fn accepted_since(vendor_id: VendorId, created_since: DateTime<Utc>) -> Self {
        Self {
            vendor_id,
            status: OrderStatus::Accepted,
            created_since,
        }
    }

    pub fn matches(&self, order: &OrderRecord) -> bool {
        order.vendor_id == self.vendor_id
            && order.status == self.status
            && order.created_at >= self.created_since
    }
}

/// Order store: units sold per product for a query.
pub trait OrderSource: Send + Sync {
    fn sold_units(&self, query: &OrderQuery) -> Result<Vec<ProductSales>, SourceError>;
}

/// Product store: every current listing of a vendor.
///
/// The vendor id is matched structurally; implementations must not reinterpret
/// it as a storage-native key.
pub trait ProductSource: Send + Sync {
    fn products_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<ProductSnapshot>, SourceError>;
}

impl<S> OrderSource for Arc<S>
where
    S: OrderSource + ?Sized,
{
    fn sold_units(&self, query: &OrderQuery) -> Result<Vec<ProductSales>, SourceError> {
        (**self).sold_units(query)
    }
}

impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    fn products_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<ProductSnapshot>, SourceError> {
        (**self).products_for_vendor(vendor_id)
    }
}

/// Group matching orders by product and sum their quantities.
///
/// Output is ordered by product id so repeated calls over the same orders are
/// identical.
pub fn sum_units_by_product<'a>(
    orders: impl IntoIterator<Item = &'a OrderRecord>,
    query: &OrderQuery,
) -> Vec<ProductSales> {
    let mut totals: BTreeMap<&'a ProductId, u64> = BTreeMap::new();

    for order in orders.into_iter().filter(|o| query.matches(o)) {
        let total = totals.entry(&order.product_id).or_insert(0);
        *total = total.saturating_add(order.order_quantity);
    }

    totals
        .into_iter()
        .map(|(product_id, total_sold)| ProductSales {
            product_id: product_id.clone(),
            total_sold,
        })
        .collect()
}
