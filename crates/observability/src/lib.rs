//! Process-wide JSON logging for the vendorhub binaries.

pub mod tracing;

pub use crate::tracing::DEFAULT_FILTER;

/// Install the global subscriber with [`DEFAULT_FILTER`]. Later calls are no-ops.
pub fn init() {
    tracing::init_with(DEFAULT_FILTER);
}
