use clap::Parser;
use gp_core::{ArticleStore, Error, GenerativeSource, Result};
use gp_feed::logging::init_logging;
use gp_feed::{CultureSubView, FeedService, RegionFilter, Screen, ViewMode, ViewSelection};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Skateboarding news feed: reconcile, filter and browse", long_about = None)]
pub struct Cli {
    /// Persisted store backend: none, memory or sqlite
    #[arg(long, env = "GP_STORAGE", default_value = "none")]
    storage: String,
    /// Backend location, e.g. the sqlite database path
    #[arg(long, env = "GP_STORAGE_URL")]
    backend_url: Option<String>,
    /// Article table of the persisted store
    #[arg(long, env = "GP_STORAGE_TABLE", default_value = gp_storage::DEFAULT_TABLE)]
    table: String,
    #[arg(long, default_value = "gemini", help = "Generative source to use. Available sources: gemini (default), dummy")]
    model: String,
    #[arg(long, env = "GEMINI_MODEL")]
    model_name: Option<String>,
    /// Gemini API key; falls back to API_KEY, then GEMINI_API_KEY
    #[arg(long)]
    api_key: Option<String>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct FilterArgs {
    /// ALL, BRAZIL, EUROPE, USA or GLOBAL
    #[arg(long, default_value = "ALL")]
    region: RegionFilter,
    /// Case-insensitive search over title, summary, content and category
    #[arg(long, default_value = "")]
    query: String,
    /// Bypass the persisted store and ask the generative source directly
    #[arg(long)]
    refresh: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load the feed and print one page of it
    Feed {
        #[command(flatten)]
        filters: FilterArgs,
        /// home, events, videos or culture
        #[arg(long, default_value = "home")]
        view: ViewMode,
        /// daily or heritage, for the culture view
        #[arg(long, default_value = "daily")]
        culture: CultureSubView,
    },
    /// Load the feed and print a single article
    Show {
        key: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Load the feed and serve it over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
        #[arg(long)]
        refresh: bool,
    },
    /// List available storage backends and generative sources
    List,
}

async fn check_storage(storage: &Arc<dyn ArticleStore>, storage_type: &str) {
    if !storage.is_configured() {
        info!("💾 No persisted store configured, every load goes to the generative source");
        return;
    }
    let count = storage.read().await.len();
    info!("💾 Storage initialized (using {}, {} stored articles)", storage_type, count);
}

/// The single boundary where load cycle errors are turned into what the
/// reader sees. Returns the fatal error, if any, so the exit status reflects it.
async fn run_cycle(feed: &FeedService, force_refresh: bool) -> Option<Error> {
    match feed.load(force_refresh).await {
        Ok(snapshot) => {
            info!("📰 Loaded {} articles (cycle {})", snapshot.len(), snapshot.cycle);
            None
        }
        Err(e @ Error::Sync(_)) => {
            warn!("⚠️ Articles loaded but not synced to the store: {}", e);
            None
        }
        Err(e) => {
            warn!("🛰️ {}", e.user_message());
            Some(e)
        }
    }
}

async fn print_screen(feed: &FeedService, selection: &ViewSelection) {
    let projection = feed.projection_for(selection).await;
    let screen = feed.screen(selection).await;
    println!("{}", render::screen(&screen, &projection));

    let status = feed.status().await;
    if !status.attribution.is_empty() && !matches!(screen, Screen::Failed { .. }) {
        println!();
        println!("Sources:");
        for source in &status.attribution {
            println!("- {} ({})", source.title, source.uri);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::List = cli.command {
        println!("Storage backends: {}", gp_storage::available_backends().join(", "));
        println!("Generative sources: {}", gp_inference::models::AVAILABLE_SOURCES.join(", "));
        return Ok(());
    }

    let mut backend = gp_storage::BackendConfig::default().with_table(cli.table.as_str());
    if let Some(url) = cli.backend_url.as_deref() {
        backend = backend.with_url(url);
    }
    let storage = gp_storage::create_storage(cli.storage.as_str(), backend).await?;
    check_storage(&storage, cli.storage.as_str()).await;

    let config = gp_inference::Config {
        source: Some(cli.model.clone()),
        api_key: cli.api_key.clone(),
        model_name: cli.model_name.clone(),
        base_url: None,
    }
    .with_env_api_key();
    let source: Arc<dyn GenerativeSource> = gp_inference::create_source(Some(config)).await?;
    info!("🧠 Generative source initialized (using {})", source.name());

    let feed = Arc::new(FeedService::new(source, storage));

    match cli.command {
        Commands::Feed { filters, view, culture } => {
            let failure = run_cycle(&feed, filters.refresh).await;
            let mut selection = ViewSelection::new();
            selection.set_region(filters.region);
            selection.set_view(view);
            selection.set_culture(culture);
            selection.search(filters.query);
            print_screen(&feed, &selection).await;
            failure.map_or(Ok(()), Err)
        }
        Commands::Show { key, filters } => {
            let failure = run_cycle(&feed, filters.refresh).await;
            let mut selection = ViewSelection::new();
            selection.set_region(filters.region);
            selection.search(filters.query);
            match feed.lookup(&selection, &key).await {
                Some(entry) => selection.open_article(&entry.key),
                None => {
                    selection.set_view(ViewMode::Article);
                    selection.selected = Some(key);
                }
            }
            print_screen(&feed, &selection).await;
            failure.map_or(Ok(()), Err)
        }
        Commands::Serve { addr, refresh } => {
            run_cycle(&feed, refresh).await;
            gp_web::serve(gp_web::AppState::new(feed), addr).await
        }
        Commands::List => Ok(()),
    }
}
