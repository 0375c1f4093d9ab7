//! steam-sale - Polls the Steam storefront and prints the daily deals.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use steam_sale::commands::{dump_store_html, SnapshotFetcher, Watcher};
use steam_sale::config::Config;
use steam_sale::format;
use steam_sale::steam::SteamClient;
use tokio::sync::watch;
use tracing::subscriber::DefaultGuard;
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

/// Flags clap gets to see; everything else on the command line is ignored.
const KNOWN_FLAGS: &[&str] = &["--debug", "--dump", "--loop", "--help", "-h", "--version", "-V"];

#[derive(Parser)]
#[command(
    name = "steam-sale",
    version,
    about = "Prints the current Steam daily deals",
    long_about = "Fetches the Steam storefront, resolves each daily deal's game name and prints a \
                  sorted price table. With --loop the storefront is polled and re-printed on change."
)]
struct Cli {
    /// Log at DEBUG level
    #[arg(long)]
    debug: bool,

    /// Write the pretty-printed storefront listing to a local file
    #[arg(long)]
    dump: bool,

    /// Keep polling the storefront and print again whenever the deals change
    #[arg(long = "loop")]
    watch: bool,
}

/// Keeps the program name and the first occurrence of each known flag.
fn known_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut args = args.into_iter();
    let mut kept: Vec<String> = args.next().into_iter().collect();

    for arg in args {
        if KNOWN_FLAGS.contains(&arg.as_str()) && !kept.iter().skip(1).any(|k| *k == arg) {
            kept.push(arg);
        }
    }

    kept
}

/// Installs a stdout subscriber for the current thread; logging stops when
/// the guard is dropped.
fn init_logging(debug: bool) -> DefaultGuard {
    let filter = if debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Runs one invocation after logging is set up: initial fetch, optional dump,
/// then a single render or the polling loop until `cancel` turns true.
async fn run<W: Write>(
    cli: &Cli,
    config: &Config,
    client: SteamClient,
    out: &mut W,
    cancel: watch::Receiver<bool>,
) -> Result<()> {
    let fetcher = SnapshotFetcher::new(client);

    debug!("Getting initial list of sale items...");
    let snapshot = fetcher.fetch_snapshot_with_progress(out).await?;
    debug!("Done getting initial list of sale items.");

    if cli.dump {
        dump_store_html(fetcher.client(), &config.dump_path).await?;
        writeln!(out, "Wrote {}", config.dump_path.display())?;
    }

    if !cli.watch {
        writeln!(out, "{}", format::render(&snapshot))?;
        return Ok(());
    }

    writeln!(out, "Looping. Press Ctrl + C to quit.")?;

    let mut watcher = Watcher::new(fetcher, snapshot, config.poll_interval());
    watcher.run_loop(out, cancel).await?;

    writeln!(out, "\nExiting.")?;
    Ok(())
}

/// Flips `cancel` to true on Ctrl+C.
fn cancel_on_ctrl_c(cancel: watch::Sender<bool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = cancel.send(true);
            }
            Err(e) => {
                // Keep the sender alive so the loop is not cancelled by accident.
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(known_args(std::env::args()));

    if cli.debug {
        println!("Setting log level to DEBUG.");
    }
    let _log_guard = init_logging(cli.debug);

    let config = Config::load_from_env()?.with_env();
    let client = SteamClient::new(&config)?;

    let (cancel_tx, cancel_rx) = watch::channel(false);
    if cli.watch {
        cancel_on_ctrl_c(cancel_tx);
    }

    run(&cli, &config, client, &mut std::io::stdout(), cancel_rx).await
}
