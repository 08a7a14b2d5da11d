use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use poe_pricer::fetcher::NinjaClient;
use poe_pricer::{ItemParser, ItemResolver, PriceCache, Resolution, Settings};

#[derive(Parser)]
#[command(name = "poe-pricer", version, about = "Price Path of Exile items copied from the game")]
struct Cli {
    /// League whose prices are used
    #[arg(long, global = true, env = "POE_PRICER_LEAGUE")]
    league: Option<String>,

    /// Root directory of the price cache
    #[arg(long, global = true, env = "POE_PRICER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an item dump and print it as JSON
    Parse {
        /// File with the copied item text, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Parse an item dump and look up its price
    Appraise {
        file: Option<PathBuf>,
        /// Use the cached prices even when they are stale
        #[arg(long)]
        offline: bool,
    },
    /// Download fresh price documents for the league
    Refresh {
        /// Download even when the cache is still fresh
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(league) = cli.league {
        settings.league = league;
    }
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }

    match cli.command {
        Command::Parse { file } => {
            let item = ItemParser::from_text(&read_input(file.as_deref())?).parse()?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Command::Appraise { file, offline } => {
            let item = ItemParser::from_text(&read_input(file.as_deref())?).parse()?;
            if !item.has_price() {
                println!("not an item");
                return Ok(());
            }

            let cache = PriceCache::from_settings(&settings);
            let index = if offline {
                cache.load().await?
            } else {
                let mut client = NinjaClient::new(settings.request_delay);
                cache.refresh(&mut client, false).await?
            };

            match ItemResolver::new(&index).resolve(&item)? {
                Resolution::Priced(remote) => {
                    let price = ItemResolver::appraise(&remote);
                    println!("{}: {:.1} chaos", item.lookup_key(), price.amount);
                    if price.low_confidence {
                        println!("low confidence");
                    }
                    if let Some(reason) = price.reason {
                        println!("({reason})");
                    }
                }
                Resolution::Unpriced => println!("{}: no price data", item.lookup_key()),
            }
        }
        Command::Refresh { force } => {
            let cache = PriceCache::from_settings(&settings);
            let mut client = NinjaClient::new(settings.request_delay);
            let index = cache.refresh(&mut client, force).await?;
            info!(league = %settings.league, dir = %cache.dir().display(), "cache ready");
            println!("{}", serde_json::to_string_pretty(&index.get_cache_stats())?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read item text: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read item text from stdin")?;
            if text.trim().is_empty() {
                warn!("stdin was empty");
            }
            Ok(text)
        }
    }
}
