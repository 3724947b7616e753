use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the tracing subscriber for an embedding application.
///
/// Call once at startup; honors `RUST_LOG` and falls back to crate-level
/// debug logging.
pub fn init() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billbuddy=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();
}
