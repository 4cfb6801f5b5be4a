use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable. Recommendation runs log
/// at `debug`, so they stay quiet unless asked for.
pub const DEFAULT_FILTER: &str = "info";

/// One JSON object per line with a wall-clock timestamp. `RUST_LOG` wins over
/// `default_filter`.
pub fn init_with(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn second_install_is_a_no_op() {
        super::init_with("debug");
        crate::init();
    }
}
