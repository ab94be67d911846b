pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        // crate internals (stage spans, session timings) at debug, deps quiet
        "info,trichroma_rs=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Span close events carry the time spent in each decode and composite span,
/// so they are only printed when debug output is on.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let is_debug = env_filter.to_string().contains("debug");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    // a second call (tests, embedding apps) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_parses_and_enables_debug() {
        let filter = EnvFilter::new(default_filter(true));
        assert!(filter.to_string().contains("trichroma_rs=debug"));
        assert!(!EnvFilter::new(default_filter(false)).to_string().contains("debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        info!("logger initialised twice");
    }
}
