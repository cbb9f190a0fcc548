// src/bin/sigq.rs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use sigq::cli::Cli;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn init_tracing() {
    // SIGQ_LOG_STYLE: "compact" (default) or "full" (timestamps and span events)
    let Ok(filter) = EnvFilter::try_from_env("SIGQ_LOG") else {
        return;
    };
    let style = std::env::var("SIGQ_LOG_STYLE").unwrap_or_default();
    if style == "full" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_timer(NoTimestamp)
            .with_writer(std::io::stderr)
            .init();
    }
    tracing::debug!("tracing initialized");
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    match sigq::commands::run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
