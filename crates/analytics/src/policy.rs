use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Urgency thresholds for reorder classification.
///
/// All comparisons run on unrounded day counts. Defaults: critical within one
/// day, reorder within five days, and 999 days for products with no demand in
/// the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    /// `days_remaining <= critical_days` marks a product critical.
    pub critical_days: f64,
    /// `days_remaining <= reorder_days` marks a product for reordering.
    pub reorder_days: f64,
    /// Days remaining reported for products with zero velocity.
    pub no_demand_days: f64,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            critical_days: 1.0,
            reorder_days: 5.0,
            no_demand_days: 999.0,
        }
    }
}

impl ReorderPolicy {
    pub fn with_critical_days(mut self, days: f64) -> Self {
        self.critical_days = days;
        self
    }

    pub fn with_reorder_days(mut self, days: f64) -> Self {
        self.reorder_days = days;
        self
    }

    pub fn with_no_demand_days(mut self, days: f64) -> Self {
        self.no_demand_days = days;
        self
    }

    /// Reject thresholds that would misclassify: non-finite or negative values,
    /// a critical bound above the reorder bound, or a no-demand sentinel that
    /// would itself qualify for reordering.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        for (name, v) in [
            ("critical_days", self.critical_days),
            ("reorder_days", self.reorder_days),
            ("no_demand_days", self.no_demand_days),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(AnalyticsError::invalid_argument(format!(
                    "{name} must be a finite non-negative number (got {v})"
                )));
            }
        }

        if self.critical_days > self.reorder_days {
            return Err(AnalyticsError::invalid_argument(
                "critical_days must not exceed reorder_days",
            ));
        }

        if self.no_demand_days <= self.reorder_days {
            return Err(AnalyticsError::invalid_argument(
                "no_demand_days must be greater than reorder_days",
            ));
        }

        Ok(())
    }

    /// Projected days until stock runs out at `daily_velocity`.
    ///
    /// Zero velocity yields the no-demand sentinel regardless of stock, so an
    /// empty shelf with no recent sales is not flagged.
    pub fn days_remaining(&self, quantity: u64, daily_velocity: f64) -> f64 {
        if daily_velocity > 0.0 {
            quantity as f64 / daily_velocity
        } else {
            self.no_demand_days
        }
    }

    pub fn is_critical(&self, days_remaining: f64) -> bool {
        days_remaining <= self.critical_days
    }

    pub fn should_reorder(&self, days_remaining: f64) -> bool {
        days_remaining <= self.reorder_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ReorderPolicy::default().validate().is_ok());
    }

    #[test]
    fn threshold_boundaries_are_inclusive() {
        let p = ReorderPolicy::default();

        assert!(p.is_critical(1.0));
        assert!(!p.is_critical(1.0000001));

        assert!(p.should_reorder(5.0));
        assert!(!p.should_reorder(5.0000001));
    }

    #[test]
    fn zero_velocity_gets_sentinel_even_with_zero_stock() {
        let p = ReorderPolicy::default();
        assert_eq!(p.days_remaining(0, 0.0), 999.0);
        assert_eq!(p.days_remaining(500, 0.0), 999.0);
        assert!(!p.should_reorder(p.days_remaining(0, 0.0)));
    }

    #[test]
    fn zero_stock_with_demand_is_critical() {
        let p = ReorderPolicy::default();
        let d = p.days_remaining(0, 3.0);
        assert_eq!(d, 0.0);
        assert!(p.is_critical(d));
    }

    #[test]
    fn rejects_inconsistent_thresholds() {
        let p = ReorderPolicy::default().with_critical_days(6.0);
        assert!(matches!(p.validate(), Err(AnalyticsError::InvalidArgument(_))));

        let p = ReorderPolicy::default().with_no_demand_days(5.0);
        assert!(p.validate().is_err());

        let p = ReorderPolicy::default().with_reorder_days(f64::NAN);
        assert!(p.validate().is_err());

        let p = ReorderPolicy::default().with_critical_days(-1.0);
        assert!(p.validate().is_err());
    }
}
