use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Line format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single lines for interactive runs.
    Compact,
    /// One JSON object per line for log collectors.
    Json,
}

/// `RUST_LOG` wins when set; otherwise `fallback` applies.
fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn init(filter: EnvFilter, format: LogFormat) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

pub fn init_cli_logger(verbose: bool) {
    let fallback = if verbose { "domainview=debug,info" } else { "domainview=info" };
    init(filter_or(fallback), LogFormat::Compact);
}

/// Long-running processes (server, scheduler) log JSON lines for collectors.
pub fn init_json_logger() {
    init(filter_or("domainview=info,actix_web=info"), LogFormat::Json);
}
