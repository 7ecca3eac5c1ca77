//! Market Router CLI
//!
//! Resolves catalog paths and generates market URLs from a TOML config and a
//! JSON catalog fixture.
//!
//! # Architecture Overview
//!
//! ```text
//!   "/eu/shoes/running"                              content 21 "/eu/shoes/running"
//!   ──────────────────┐                              ▲
//!                     ▼                              │
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          url_resolver                             │
//!   │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐   │
//!   │  │ market       │──▶│ hierarchical │──▶│ catalog (repository, │   │
//!   │  │ router       │   │ router       │   │ SEO index, paths)    │   │
//!   │  └──────┬───────┘   └──────────────┘   └──────────────────────┘   │
//!   │         │                                                         │
//!   │         ▼                                                         │
//!   │  ┌──────────────┐   ┌──────────────────────────────┐              │
//!   │  │ market       │   │ cache (market-partitioned)   │              │
//!   │  │ resolution   │   │                              │              │
//!   │  └──────────────┘   └──────────────────────────────┘              │
//!   │                                                                   │
//!   │  config · lifecycle · observability                               │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use market_router::catalog::types::{ContentRef, Locale};
use market_router::config::watcher::ConfigWatcher;
use market_router::config::{load_config, RouterConfig};
use market_router::lifecycle::signals::shutdown_on_ctrl_c;
use market_router::lifecycle::{bootstrap, RoutingService, Shutdown};
use market_router::market::types::MarketId;
use market_router::observability::logging::init_logging;
use market_router::routing::{ContextMode, RequestContext, UrlGeneratorContext, UrlGeneratorOptions};

#[derive(Parser)]
#[command(name = "market-router")]
#[command(about = "Market-aware catalog URL router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a URL path to catalog content
    Resolve {
        path: String,
        /// Market of the request when the path names none
        #[arg(long)]
        market: Option<String>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Generate the URL of a content item
    Url {
        content_id: u64,
        #[arg(long, default_value_t = 0)]
        work_id: u32,
        #[arg(long)]
        market: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, value_enum, default_value_t = Mode::Default)]
        mode: Mode,
        /// Prefix the configured site URL
        #[arg(long)]
        absolute: bool,
    },
    /// Watch the config file and apply site changes until Ctrl-C
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Default,
    Edit,
    Preview,
}

impl From<Mode> for ContextMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Default => ContextMode::Default,
            Mode::Edit => ContextMode::Edit,
            Mode::Preview => ContextMode::Preview,
        }
    }
}

fn request(market: Option<String>) -> RequestContext {
    match market {
        Some(market) => RequestContext::new().with_market(MarketId::new(market)),
        None => RequestContext::new(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config: RouterConfig = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!("market-router v{} starting", env!("CARGO_PKG_VERSION"));
    let service = bootstrap(&config)?;

    match cli.command {
        Commands::Resolve {
            path,
            market,
            language,
        } => match service
            .resolver()
            .route(request(market), &path, language.map(Locale::new))
        {
            Some(route) => {
                let market = route
                    .market
                    .unwrap_or_else(|| service.default_market().clone());
                println!(
                    "{} {} ({:?}) market={}",
                    route.content.link, route.content.name, route.content.kind, market
                );
            }
            None => {
                eprintln!("No content found for '{}'", path);
                std::process::exit(1);
            }
        },
        Commands::Url {
            content_id,
            work_id,
            market,
            language,
            mode,
            absolute,
        } => {
            let ctx = UrlGeneratorContext::new(
                request(market),
                ContentRef::with_work_id(content_id, work_id),
            )
            .with_language(language.map(Locale::new))
            .with_mode(mode.into());
            let options = UrlGeneratorOptions {
                force_absolute: absolute,
            };
            match service.resolver().get_url(ctx, options) {
                Some(url) => println!("{}", url),
                None => {
                    eprintln!("No URL for content {}", content_id);
                    std::process::exit(1);
                }
            }
        }
        Commands::Watch => watch(&cli.config, config, &service).await?,
    }

    Ok(())
}

async fn watch(
    path: &std::path::Path,
    config: RouterConfig,
    service: &RoutingService,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = Shutdown::new();
    let (watcher, mut updates) = ConfigWatcher::new(path, config);
    let _watcher = watcher.run()?;
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let mut stop = shutdown.subscribe();
    loop {
        tokio::select! {
            Some(site) = updates.recv() => service.apply_site(&site),
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
