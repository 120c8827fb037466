mod analysis;
mod cache;
mod config;
mod display;
mod error;
mod heroes;
mod ingest;
mod snapshot;
mod source;

use analysis::view::{SortField, SortOrder, ViewState};
use anyhow::Context;
use cache::RowCache;
use clap::Parser;
use config::Config;
use display::output::{
    display_error, display_hero_table, display_info, display_player_page, display_success,
};
use error::AppError;
use heroes::HeroDirectory;
use indicatif::ProgressBar;
use ingest::{normalize, Normalized};
use snapshot::{RunParams, Snapshot, SnapshotStore};
use source::client::DataSourceClient;

#[derive(Parser, Debug)]
#[command(name = "Dota Stats")]
#[command(about = "Aggregate a team's match log into hero and player statistics", long_about = None)]
struct Args {
    /// Show per-player hero breakdowns instead of overall hero stats
    #[arg(short, long)]
    players: bool,

    /// Case-insensitive search (hero name, or player name/id with --players)
    #[arg(short, long)]
    search: Option<String>,

    /// Only aggregate scrim games
    #[arg(long)]
    scrim_only: bool,

    /// Sort field
    #[arg(long, value_enum, default_value = "games")]
    sort: SortField,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    order: SortOrder,

    /// Page of players to display (player mode)
    #[arg(long, default_value = "1")]
    page: usize,

    /// Players per page (player mode)
    #[arg(long, default_value = "4")]
    page_size: usize,

    /// Hero rows listed before truncation
    #[arg(long, default_value = "15")]
    limit: usize,

    /// List every row instead of truncating
    #[arg(long)]
    all: bool,

    /// Force refresh from the data source (ignore cached rows)
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let heroes = HeroDirectory::bundled()?;

    // Step 1: raw rows, cached or fetched
    let mut row_cache = RowCache::load(&config.match_log_url)
        .unwrap_or_else(|_| RowCache::new(&config.match_log_url));

    let (rows, directory) = if !args.refresh
        && row_cache.is_usable(&config.match_log_url, config.cache_max_age_mins)
    {
        display_success(&format!(
            "⚡ Using cached rows ({} rows, {}m old)",
            row_cache.rows.len(),
            row_cache.age_minutes()
        ));
        (row_cache.rows.clone(), row_cache.directory())
    } else {
        display_info("Fetching match log from the data source...");
        let client = DataSourceClient::new(config.clone());
        let rows = client.fetch_match_rows().context("fetching match log")?;
        let directory = client
            .fetch_player_directory()
            .context("fetching player directory")?;
        display_success(&format!("Fetched {} raw rows", rows.len()));

        row_cache.replace(rows.clone(), &directory);
        let _ = row_cache.save(); // cache failures never block a run
        (rows, directory)
    };

    if rows.is_empty() {
        return Err(AppError::NoMatchRows.into());
    }

    // Step 2: normalize rows into events under a run ticket
    let mut store = SnapshotStore::new();
    let ticket = store.begin_run(RunParams {
        scrim_only: args.scrim_only,
    });

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_message("Normalizing rows");

    let mut events = Vec::new();
    let mut discarded = 0usize;
    let mut filtered_out = 0usize;

    for row in &rows {
        match normalize(row, ticket.params.scrim_only, &heroes) {
            Normalized::Event(event) => events.push(event),
            Normalized::FilteredOut => filtered_out += 1,
            Normalized::Discarded => discarded += 1,
        }
        pb.inc(1);
    }

    pb.finish_with_message("✓ Rows normalized");

    if discarded > 0 {
        display_info(&format!(
            "Skipped {} incomplete or malformed rows",
            discarded
        ));
    }
    if ticket.params.scrim_only && filtered_out > 0 {
        display_info(&format!("Excluded {} non-scrim rows", filtered_out));
    }

    // Step 3: aggregate, derive, publish
    let snapshot = Snapshot::from_events(&events, ticket.params, &heroes, &directory);
    if !store.publish(&ticket, snapshot) {
        return Err(AppError::StaleRun.into());
    }
    let snapshot = store.latest().ok_or(AppError::StaleRun)?;

    let mode = if snapshot.params.scrim_only {
        "scrims only"
    } else {
        "all matches"
    };
    display_success(&format!("Aggregated {} events ({})", events.len(), mode));

    // Step 4: query view
    let mut view = ViewState::new(args.sort, args.order, args.page_size, args.limit);
    view.set_scrim_only(args.scrim_only);
    if let Some(query) = &args.search {
        view.set_query(query);
    }
    view.set_page(args.page);
    view.set_show_all(args.all);

    if args.players {
        display_player_page(&view.player_page(snapshot));
    } else {
        display_hero_table(&view.hero_rows(snapshot));
    }

    Ok(())
}
