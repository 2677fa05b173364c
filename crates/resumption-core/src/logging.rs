// Purpose: Tracing subscriber setup shared by the resumption crates

use std::sync::Once;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    EnvFilter, Registry,
};

static TEST_INIT: Once = Once::new();

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human output, one block per event
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// JSON lines carrying the span list of each event
    Json,
}

//-----------------------------------------------------------------------------
// Tracing Initialization
//-----------------------------------------------------------------------------

/// Filter for resumption runs. `RUST_LOG` takes precedence over `directives`.
fn resumption_filter(directives: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(directives)?),
    }
}

/// Install the global subscriber for law runs and resumption traces.
///
/// `directives` uses the `EnvFilter` syntax, e.g.
/// "resumption_core=trace,info". Span closes are reported so each law
/// check shows up with its timing.
///
/// Fails if the directives do not parse or a global subscriber is already
/// installed.
pub fn init_tracing(directives: &str, format: LogFormat) -> Result<()> {
    let registry = Registry::default().with(resumption_filter(directives)?);
    let events = fmt::layer().with_span_events(FmtSpan::CLOSE).with_target(true);

    match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(registry.with(events.pretty()))?,
        LogFormat::Compact => tracing::subscriber::set_global_default(registry.with(events.compact()))?,
        LogFormat::Json => {
            let json = events.json().with_current_span(true).with_span_list(true);
            tracing::subscriber::set_global_default(registry.with(json))?
        }
    }
    Ok(())
}

/// Install a test-writer subscriber at debug level, once per process
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let filter = resumption_filter("debug").unwrap_or_else(|_| EnvFilter::new("debug"));
        let events = fmt::layer().compact().with_target(true).with_test_writer();
        let _ = tracing::subscriber::set_global_default(Registry::default().with(filter).with(events));
    });
}

//-----------------------------------------------------------------------------
// Tests
//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("test logging initialised");
    }

    #[test]
    fn test_second_global_subscriber_is_rejected() {
        init_test_logging();
        assert!(init_tracing("debug", LogFormat::Json).is_err());
    }

    #[test]
    fn test_malformed_directives_are_rejected_before_install() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(resumption_filter("resumption_core=loud").is_err());
        }
        assert!(resumption_filter("resumption_core=trace,info").is_ok());
    }
}
