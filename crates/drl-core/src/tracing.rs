use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Per-statement sqlx logs stay quiet.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// Install the JSON stdout subscriber.
///
/// Reads `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. A second call is a
/// no-op, so tests may call it freely.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
