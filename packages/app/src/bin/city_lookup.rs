//! Dev CLI for exercising the city lookup pipeline against the real
//! geocoding provider.
//!
//! Reads GOOGLE_MAPS_API_KEY from the environment (or .env) and prints the
//! candidate list a screen would show for the query.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_core::domains::lookup::CityLookupClient;
use app_core::kernel::GoogleGeocodeAdapter;
use app_core::Config;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "city_lookup")]
#[command(about = "Look up city candidates for a free-text query")]
struct Cli {
    /// Free-text city query (e.g. "São Paulo")
    query: String,

    /// Use the autocomplete endpoint instead of geocoding
    #[arg(long)]
    suggest: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,app_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let adapter = GoogleGeocodeAdapter::from_config(&config)?
        .map(|adapter| Arc::new(adapter) as Arc<dyn app_core::kernel::BaseGeocodeService>);
    let client = CityLookupClient::new(adapter);

    if cli.suggest {
        match client.suggest(cli.query.trim()).await {
            Ok(labels) => {
                for label in labels {
                    println!("{label}");
                }
            }
            Err(error) => println!("{error}"),
        }
        return Ok(());
    }

    match client.lookup(cli.query.trim()).await {
        Ok(candidates) => {
            for candidate in candidates {
                println!(
                    "{} — {} — {}  [{}]",
                    candidate.city, candidate.state, candidate.country, candidate.formatted
                );
            }
        }
        Err(error) => println!("{error}"),
    }

    Ok(())
}
