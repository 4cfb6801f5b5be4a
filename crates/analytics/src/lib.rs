//! `vendorhub-analytics`
//!
//! **Responsibility:** read-only reporting over a vendor's orders and stock.
//!
//! This crate is intentionally **not** a storage layer:
//! - It reads orders and products only through the [`OrderSource`] and
//!   [`ProductSource`] boundary traits.
//! - It never writes anything back.
//! - Every call recomputes from fresh snapshots (no caching).
//!
//! The pipeline is two stages: [`VelocityEstimator`] turns accepted orders in a
//! trailing window into units-per-day, and [`ReorderRecommender`] joins that
//! against current stock to rank products that need reordering.

pub mod error;
pub mod model;
pub mod policy;
pub mod reorder;
pub mod source;
pub mod velocity;

pub use error::AnalyticsError;
pub use model::{
    OrderRecord, OrderStatus, ProductSales, ProductSnapshot, Recommendation, RecommendationReport,
    VelocityRecord,
};
pub use policy::ReorderPolicy;
pub use reorder::{ReorderRecommender, recommend};
pub use source::{OrderQuery, OrderSource, ProductSource, SourceError, sum_units_by_product};
pub use velocity::{DEFAULT_WINDOW_DAYS, VelocityEstimator, velocities_from_sales};
