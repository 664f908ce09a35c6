use clanwatch::report;
use clanwatch_core::{
    config::Config,
    members::{MemberColumn, MemberSort},
    CategoryFilter, ViewState,
};
use clanwatch_feeds::ClanClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clanwatch", version, about = "RuneScape clan activity, members and stats in the terminal")]
struct Cli {
    /// Write debug logs to $TMPDIR/clanwatch-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/clanwatch/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Clan to watch.
    #[arg(long)]
    clan: Option<String>,

    /// Members sampled per activity load.
    #[arg(long, value_name = "N")]
    sample: Option<usize>,

    /// Concurrent activity requests per batch.
    #[arg(long, value_name = "N")]
    batch: Option<usize>,

    /// Maximum activity events shown.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the sampled clan activity feed and exit.
    Feed {
        /// all, drops, pets, kills, levels, quests, or xp.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Keep events whose player or text contains this.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print the clan roster and exit.
    Members {
        /// name, rank, xp, or kills.
        #[arg(long, default_value = "xp")]
        sort: MemberColumn,
        /// Reverse the column's natural order.
        #[arg(long)]
        reverse: bool,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print one player's stats and exit.
    Stats {
        /// RuneScape name.
        rsn: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.command.is_some())?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config unreadable, using defaults");
            Config::defaults()
        }),
    };
    if let Some(clan) = cli.clan {
        config.clan.name = clan;
    }
    if let Some(n) = cli.sample {
        config.feed.sample_size = n;
    }
    if let Some(n) = cli.batch {
        config.feed.batch_size = n;
    }
    if let Some(n) = cli.limit {
        config.feed.limit = n;
    }

    let client = ClanClient::from_config(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let Some(command) = cli.command else {
        let result = clanwatch_tui::run(&config, client, runtime.handle().clone());
        // Abandon loads still in flight when the user quits.
        runtime.shutdown_background();
        return result;
    };

    match command {
        Cmd::Feed { category, query } => {
            let load = runtime.block_on(client.load_feed()).map_err(|err| {
                eprintln!("{}", report::FEED_UNAVAILABLE);
                err
            })?;
            let state = ViewState { filter: category, query, limit: config.feed.limit };
            print!("{}", report::feed_report(&load, &state, config.ui.show_dates));
        }
        Cmd::Members { sort, reverse, query } => {
            let members = runtime.block_on(client.roster()).map_err(|err| {
                eprintln!("{}", report::MEMBERS_UNAVAILABLE);
                err
            })?;
            let mut sort = MemberSort::by(sort);
            sort.ascending ^= reverse;
            print!("{}", report::members_report(&members, sort, &query));
        }
        Cmd::Stats { rsn } => {
            let stats = runtime.block_on(client.player_stats(&rsn))?;
            print!("{}", report::stats_report(&stats));
        }
    }
    Ok(())
}

/// `--debug` logs to a file so the TUI screen stays clean; headless runs log
/// warnings (or `RUST_LOG`) to stderr.
fn init_tracing(debug: bool, headless: bool) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    if debug {
        let path = std::env::temp_dir().join("clanwatch-debug.log");
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "clanwatch debug log started");
    } else if headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
