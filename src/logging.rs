use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LogConfig;

const DIRECTIVES: [&str; 4] = ["hyper=warn", "hyper_util=warn", "reqwest=info", "tower_http=info"];

/// Installs the global subscriber: stdout always, plus a JSON file when
/// `json_path` is configured. `RUST_LOG` overrides the configured level.
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for directive in DIRECTIVES {
        if let Ok(parsed) = directive.parse::<Directive>() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    let stdout_layer = default_layer().with_writer(std::io::stdout);

    let json_layer = match &config.json_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                default_layer()
                    .json()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .with(json_layer)
        .try_init()?;

    Ok(())
}

fn default_layer<S>() -> tracing_subscriber::fmt::Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
}
