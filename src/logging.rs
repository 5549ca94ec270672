use anyhow::Result;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn init_tracing(level: &str, format: &str) -> Result<()> {
    let level_filter = parse_level(level);

    let init_result = match parse_format(format) {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_filter(fmt_targets(level_filter));

            tracing_subscriber::registry().with(fmt_layer).try_init()
        }
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(fmt_targets(level_filter));

            tracing_subscriber::registry().with(fmt_layer).try_init()
        }
    };

    if let Err(err) = init_result {
        let msg = err.to_string();
        if msg.contains("global default trace dispatcher has already been set") {
            return Ok(());
        }
        return Err(err.into());
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> LogFormat {
    match format.trim().to_ascii_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

// Request traces from tower-http follow the chosen level too.
fn fmt_targets(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target("folio", level)
        .with_target("tower_http", level)
        .with_default(LevelFilter::WARN)
}
