//! chanorder: put Emby live-TV channels in ascending numeric order.

use std::process::ExitCode;

use anyhow::Context;
use chanorder_client::EmbyClient;
use chanorder_core::ChanOrderConfig;
use chanorder_sort::{fully_sorted, Driver, RunSettings, RunState};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

/// Exit status when the ceiling is reached without convergence.
const EXIT_NOT_ORDERED: u8 = 2;

fn print_usage() {
    println!("chanorder: sort Emby live-TV channels by channel number");
    println!();
    println!("Usage: chanorder [command]");
    println!();
    println!("Commands:");
    println!("  (none)    Reorder channels until the list is ascending, then refresh the guide");
    println!("  check     Report whether the current order is ascending, without writing");
    println!("            (also accepted as --check)");
    println!("  help      Show this help message");
    println!();
    println!("Configuration (chanorder.json or CHANORDER_CONFIG, overridden by env):");
    println!("  CHANORDER_SERVER        Base URL (default http://localhost:8096/emby)");
    println!("  CHANORDER_API_KEY       Admin API key (required)");
    println!("  CHANORDER_PAUSE_MS      Delay after each index write (default 25)");
    println!("  CHANORDER_MAX_PASSES    Passes before giving up (default 15)");
    println!("  CHANORDER_TIMEOUT_SECS  Per-request timeout (default 30)");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs on stderr, progress lines on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let check_only = match args.get(1).map(String::as_str) {
        None => false,
        Some("check" | "--check") => true,
        Some("help" | "--help" | "-h") => {
            print_usage();
            return Ok(ExitCode::SUCCESS);
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'chanorder help' for usage.", other);
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = ChanOrderConfig::from_env().context("invalid configuration")?;
    info!("Server: {}", config.base_url());
    let client = EmbyClient::new(&config)?;

    if check_only {
        let report = fully_sorted(&client).await?;
        println!("{}", report::check_line(&report));
        return Ok(if report.ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(EXIT_NOT_ORDERED)
        });
    }

    let driver = Driver::new(client, RunSettings::from_config(&config));
    let outcome = driver
        .run(|event| {
            if let Some(line) = report::event_line(event) {
                println!("{}", line);
            }
        })
        .await?;

    Ok(match outcome.state {
        RunState::Exhausted => ExitCode::from(EXIT_NOT_ORDERED),
        _ => ExitCode::SUCCESS,
    })
}
