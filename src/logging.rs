use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber. Output goes to stderr so that command
/// output on stdout stays machine-readable.
///
/// Uses `RUST_LOG` if set, otherwise `default_level`. Calling it again is a no-op.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .try_init()
        .ok();

    tracing::debug!(app = crate::paths::APP_ID, "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logging(DEFAULT_LEVEL);
        init_logging("debug");
    }
}
