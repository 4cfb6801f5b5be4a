use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use vendorhub_core::VendorId;

use crate::error::AnalyticsError;
use crate::model::{ProductSales, VelocityRecord};
use crate::source::{OrderQuery, OrderSource};

/// Trailing window, in days, used when no other window is requested.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Sales velocity estimator over a trailing window of accepted orders.
///
/// Model: `daily_velocity = units sold in [now - window, now] / window`.
/// Products without accepted orders in the window are simply absent from the
/// output; callers treat absence as zero velocity.
#[derive(Debug, Clone)]
pub struct VelocityEstimator<O> {
    orders: O,
}

impl<O> VelocityEstimator<O>
where
    O: OrderSource,
{
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    /// Estimate velocities as of the current time.
    pub fn estimate(&self, vendor_id: &str, window_days: i64) -> Result<Vec<VelocityRecord>, AnalyticsError> {
        self.estimate_at(vendor_id, window_days, Utc::now())
    }

    /// Estimate velocities as of `now`.
    pub fn estimate_at(
        &self,
        vendor_id: &str,
        window_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VelocityRecord>, AnalyticsError> {
        let vendor_id = parse_vendor_id(vendor_id)?;
        ensure_positive_window(window_days)?;

        let since = Duration::try_days(window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                AnalyticsError::invalid_argument(format!("window of {window_days} days is out of range"))
            })?;

        let query = OrderQuery::accepted_since(vendor_id, since);
        let sales = self.orders.sold_units(&query).map_err(|e| {
            warn!(vendor = %query.vendor_id, error = %e, "order query failed");
            AnalyticsError::from(e)
        })?;

        velocities_from_sales(&sales, window_days)
    }
}

/// Convert per-product unit totals into daily velocities.
pub fn velocities_from_sales(
    sales: &[ProductSales],
    window_days: i64,
) -> Result<Vec<VelocityRecord>, AnalyticsError> {
    ensure_positive_window(window_days)?;

    let window = window_days as f64;
    Ok(sales
        .iter()
        .map(|s| VelocityRecord {
            product_id: s.product_id.clone(),
            daily_velocity: s.total_sold as f64 / window,
        })
        .collect())
}

pub(crate) fn parse_vendor_id(vendor_id: &str) -> Result<VendorId, AnalyticsError> {
    VendorId::new(vendor_id).map_err(|e| AnalyticsError::invalid_argument(e.to_string()))
}

fn ensure_positive_window(window_days: i64) -> Result<(), AnalyticsError> {
    if window_days <= 0 {
        return Err(AnalyticsError::invalid_argument(format!(
            "window_days must be positive (got {window_days})"
        )));
    }
    Ok(())
}
