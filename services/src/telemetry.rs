use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins when set; otherwise service-level debug, info elsewhere.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chirp_services=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
