use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendorhub_core::{ProductId, VendorId};

/// Order lifecycle status as recorded by the order store.
///
/// Only `Accepted` orders count as sales. Statuses this service does not know
/// about deserialize as `Other` and are ignored like any non-accepted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(other)]
    Other,
}

/// One order as stored by the order collaborator. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub vendor_id: VendorId,
    pub product_id: ProductId,
    pub order_quantity: u64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Current stock of one product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub vendor_id: VendorId,
    pub product_name: String,
    pub quantity: u64,
}

/// Units sold per product, as returned by the order collaborator's
/// group-by-product query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: ProductId,
    pub total_sold: u64,
}

/// Estimated units sold per day for one product (derived, never persisted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityRecord {
    pub product_id: ProductId,
    pub daily_velocity: f64,
}

/// A product that should be reordered, with display-rounded figures.
///
/// `daily_sales` is a fixed two-decimal string; `days_remaining` is rounded to
/// one decimal, or the no-demand sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: ProductId,
    pub name: String,
    pub current_stock: u64,
    pub daily_sales: String,
    pub days_remaining: f64,
    pub is_critical: bool,
    pub should_reorder: bool,
}

/// Output of one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationReport {
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        Self {
            count: recommendations.len(),
            recommendations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
