pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber on stderr. `RUST_LOG` takes precedence
/// over `default_level`.
pub fn init(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let span_events = span_events_for(&env_filter.to_string());

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Stage spans are only worth printing once per-stall output is on.
fn span_events_for(filter: &str) -> FmtSpan {
    if filter.contains("debug") || filter.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_events_follow_filter_level() {
        assert_eq!(span_events_for("info"), FmtSpan::NONE);
        assert_eq!(span_events_for("warn,lot_occupancy=debug"), FmtSpan::CLOSE);
        assert_eq!(span_events_for("trace"), FmtSpan::CLOSE);
    }
}
