//! market-brief: run the deterministic market analysis over a file of daily bars.
//!
//! Prints the validated brief and the exact payload an interpreter would
//! receive. A summary rejected by the validation gate prints its diagnostic
//! and exits with status 2.
//!
//! Usage:
//!   cargo run -p market-brief -- --input bars.json
//!   cargo run -p market-brief -- --input bars.json --symbol QQQ --lookback 400
//!   cargo run -p market-brief -- --prompt

mod source;

use analysis_core::AnalysisError;
use analysis_orchestrator::{AnalysisConfig, MarketBrief, MarketBriefService, SYSTEM_PROMPT};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use source::JsonFileSource;

const DEFAULT_SYMBOL: &str = "SPY";
const EXIT_REJECTED: i32 = 2;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    brief: &'a MarketBrief,
    interpreter_payload: analysis_orchestrator::InterpreterPayload,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "market_brief=info,analysis_orchestrator=info".into());

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the brief, so logs go to stderr
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--prompt") {
        println!("{SYSTEM_PROMPT}");
        return Ok(());
    }

    let Some(input) = arg_value(&args, "--input") else {
        bail!("usage: market-brief --input <bars.json> [--symbol SYM] [--lookback DAYS] [--prompt]");
    };
    let symbol = arg_value(&args, "--symbol").unwrap_or(DEFAULT_SYMBOL).to_uppercase();

    let mut config = AnalysisConfig::from_env().context("Invalid BRIEF_* configuration")?;
    if let Some(days) = arg_value(&args, "--lookback") {
        config.lookback_days = days
            .parse()
            .with_context(|| format!("--lookback expects a number of days, got {days:?}"))?;
    }

    tracing::info!(symbol = %symbol, input, lookback_days = config.lookback_days, "Building market brief");

    // Offline run: no interpreter is attached
    let service = MarketBriefService::new(JsonFileSource::new(input), (), config);

    let brief = match service.brief(&symbol).await {
        Ok(brief) => brief,
        Err(err @ AnalysisError::ValidationFailure { .. }) => {
            eprintln!("{err}");
            std::process::exit(EXIT_REJECTED);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Analysis of {symbol} from {input} failed"));
        }
    };

    for warning in &brief.data_quality.warnings {
        tracing::warn!(date = %warning.date, kind = %warning.warning_type, "{}", warning.message);
    }

    let output = Output {
        interpreter_payload: brief.payload(),
        brief: &brief,
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize brief")?;
    println!("{json}");

    Ok(())
}
