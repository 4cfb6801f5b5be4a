use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use vendorhub_core::ProductId;

use crate::error::AnalyticsError;
use crate::model::{ProductSnapshot, Recommendation, RecommendationReport, VelocityRecord};
use crate::policy::ReorderPolicy;
use crate::source::{OrderSource, ProductSource};
use crate::velocity::{DEFAULT_WINDOW_DAYS, VelocityEstimator, parse_vendor_id};

/// Reorder recommender: joins sales velocity against current stock.
///
/// Each call takes two fresh read snapshots (orders, then products) and works
/// only once both are complete. Nothing is cached and nothing is written.
#[derive(Debug, Clone)]
pub struct ReorderRecommender<O, P> {
    estimator: VelocityEstimator<O>,
    products: P,
    policy: ReorderPolicy,
}

impl<O, P> ReorderRecommender<O, P>
where
    O: OrderSource,
    P: ProductSource,
{
    pub fn new(orders: O, products: P) -> Self {
        Self {
            estimator: VelocityEstimator::new(orders),
            products,
            policy: ReorderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ReorderPolicy {
        &self.policy
    }

    /// Products of `vendor_id` that need reordering, most urgent first.
    pub fn generate(&self, vendor_id: &str) -> Result<RecommendationReport, AnalyticsError> {
        self.generate_at(vendor_id, Utc::now())
    }

    /// Same as [`generate`](Self::generate) with an explicit clock.
    pub fn generate_at(
        &self,
        vendor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RecommendationReport, AnalyticsError> {
        let vendor = parse_vendor_id(vendor_id)?;
        self.policy.validate()?;

        let velocities = self.estimator.estimate_at(vendor_id, DEFAULT_WINDOW_DAYS, now)?;

        let mut products = self.products.products_for_vendor(&vendor).map_err(|e| {
            warn!(vendor = %vendor, error = %e, "product query failed");
            AnalyticsError::from(e)
        })?;

        let before = products.len();
        products.retain(|p| p.vendor_id == vendor);
        if products.len() != before {
            warn!(
                vendor = %vendor,
                dropped = before - products.len(),
                "product store returned listings of another vendor"
            );
        }

        let recommendations = recommend(&products, &velocities, &self.policy);

        debug!(
            vendor = %vendor,
            products = products.len(),
            velocities = velocities.len(),
            recommendations = recommendations.len(),
            "reorder recommendations generated"
        );

        Ok(RecommendationReport::new(recommendations))
    }
}

/// Classify, filter and rank products for reordering.
///
/// Products without a velocity record have zero velocity. Thresholds are
/// applied to the unrounded day count; rounding is for display only. The sort
/// is stable on the unrounded day count, so ties keep `products` order.
pub fn recommend(
    products: &[ProductSnapshot],
    velocities: &[VelocityRecord],
    policy: &ReorderPolicy,
) -> Vec<Recommendation> {
    let by_product: HashMap<&ProductId, f64> = velocities
        .iter()
        .map(|v| (&v.product_id, v.daily_velocity))
        .collect();

    let mut ranked: Vec<(f64, Recommendation)> = products
        .iter()
        .filter_map(|p| {
            let velocity = by_product.get(&p.product_id).copied().unwrap_or(0.0);
            let days = policy.days_remaining(p.quantity, velocity);

            if !policy.should_reorder(days) {
                return None;
            }

            Some((
                days,
                Recommendation {
                    product_id: p.product_id.clone(),
                    name: p.product_name.clone(),
                    current_stock: p.quantity,
                    daily_sales: format!("{velocity:.2}"),
                    days_remaining: display_days(days),
                    is_critical: policy.is_critical(days),
                    should_reorder: true,
                },
            ))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, r)| r).collect()
}

/// One-decimal display value, rounded from the exact binary value the way
/// `{:.1}` prints it (1.45 is stored as 1.4499.. and shows as 1.4).
fn display_days(days: f64) -> f64 {
    format!("{days:.1}").parse().unwrap_or(days)
}
