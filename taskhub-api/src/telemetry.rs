/// Tracing subscriber setup shared by the server and the seeding tool
///
/// `RUST_LOG` overrides the default filter. With JSON output enabled each
/// event is one JSON object per line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "taskhub_api=debug,taskhub_shared=info,tower_http=debug";

/// Installs the global subscriber
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}
