//! OpenSky state vector CLI
//!
//! Queries aircraft state vectors from the OpenSky Network REST API.

use clap::{Parser, Subcommand};
use opensky_client::{BoundingBox, ClientConfig, OpenSkyClient, StateFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "opensky-client")]
#[command(about = "Query aircraft state vectors from the OpenSky Network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch state vectors
    States {
        /// OAuth2 client id
        #[arg(long, env = "OPENSKY_CLIENT_ID")]
        client_id: Option<String>,

        /// OAuth2 client secret
        #[arg(long, env = "OPENSKY_CLIENT_SECRET")]
        client_secret: Option<String>,

        /// Unix timestamp (seconds) to retrieve states for
        #[arg(long)]
        time: Option<u64>,

        /// ICAO24 transponder address to filter by (repeatable)
        #[arg(long)]
        icao24: Vec<String>,

        /// Lower latitude bound of bounding box
        #[arg(long)]
        lamin: Option<f64>,

        /// Upper latitude bound of bounding box
        #[arg(long)]
        lamax: Option<f64>,

        /// Lower longitude bound of bounding box
        #[arg(long)]
        lomin: Option<f64>,

        /// Upper longitude bound of bounding box
        #[arg(long)]
        lomax: Option<f64>,

        /// Request extended state vectors with the aircraft category
        #[arg(long)]
        extended: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::States {
            client_id,
            client_secret,
            time,
            icao24,
            lamin,
            lamax,
            lomin,
            lomax,
            extended,
        } => {
            let mut config = ClientConfig::new();
            match (client_id, client_secret) {
                (Some(id), Some(secret)) => config = config.with_credentials(id, secret),
                (None, None) => {
                    tracing::warn!("no credentials set, using anonymous rate limits");
                }
                _ => return Err("client id and secret must be set together".into()),
            }

            let client = OpenSkyClient::new(config)?;

            let mut filter = StateFilter::new();
            if let Some(time) = time {
                filter = filter.with_time(time);
            }
            for addr in icao24 {
                filter = filter.with_icao24(addr);
            }
            match (lamin, lamax, lomin, lomax) {
                (Some(lamin), Some(lamax), Some(lomin), Some(lomax)) => {
                    filter =
                        filter.with_bounding_box(BoundingBox::new(lamin, lamax, lomin, lomax));
                }
                (None, None, None, None) => {}
                _ => return Err("all four bounding box bounds must be set together".into()),
            }
            if extended {
                filter = filter.with_category();
            }

            let states = client.get_states(&filter).await?;

            let fmt = |v: Option<f64>| match v {
                Some(x) => format!("{x:.1}"),
                None => "-".to_string(),
            };

            for sv in &states {
                println!(
                    "{} {:<8} {:<20} lat={:<8} lon={:<9} alt={:<8} vel={}",
                    sv.icao24,
                    sv.callsign.as_deref().map(str::trim).unwrap_or("-"),
                    sv.origin_country,
                    fmt(sv.latitude),
                    fmt(sv.longitude),
                    fmt(sv.baro_altitude),
                    fmt(sv.velocity),
                );
            }

            println!(
                "{} aircraft, credits remaining: {}",
                states.len(),
                client
                    .remaining_credits()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            );
        }
    }

    Ok(())
}
