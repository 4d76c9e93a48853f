use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traffic_eta::api::{build_router, state::AppState};
use traffic_eta::config::{AppConfig, MAX_HORIZON_HOURS};
use traffic_eta::journey::{plan_journey, JourneyReport, JourneyRequest};
use traffic_eta::models::TravelMode;
use traffic_eta::provider::{CachedProvider, DirectionsProvider, GoogleDirectionsProvider};
use traffic_eta::trend::{sample_trend, TrendReport};

#[derive(Parser)]
#[command(name = "traffic-eta")]
#[command(about = "Fastest routes, fuel cost and hourly ETA trends")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fastest route and its fuel cost
    Route {
        /// Start location
        #[arg(long)]
        from: String,

        /// Destination
        #[arg(long)]
        to: String,

        /// driving, walking or bicycling
        #[arg(long, default_value = "driving")]
        mode: TravelMode,

        /// Fuel price per litre
        #[arg(long)]
        fuel_price: Option<f64>,

        /// Vehicle fuel efficiency in km/l
        #[arg(long)]
        efficiency: Option<f64>,
    },

    /// Sample the ETA for departures over the next few hours
    Trend {
        /// Start location
        #[arg(long)]
        from: String,

        /// Destination
        #[arg(long)]
        to: String,

        /// driving, walking or bicycling
        #[arg(long, default_value = "driving")]
        mode: TravelMode,

        /// Number of hourly samples
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn DirectionsProvider>> {
    let google = GoogleDirectionsProvider::from_env(&config.provider)?;
    Ok(Arc::new(CachedProvider::new(google)))
}

fn print_journey(report: &JourneyReport, currency: &str) {
    println!("{} → {} ({})", report.origin, report.destination, report.mode);
    println!();
    println!("Fastest route: {}", report.fastest.summary);
    println!("  ETA:                 {}", report.fastest.eta_label);
    println!("  Distance:            {}", report.fastest.distance_text);
    println!(
        "  Estimated fuel cost: {}{:.2}",
        currency, report.estimated_fuel_cost
    );
    println!(
        "  Map:                 ({:.5}, {:.5}) → ({:.5}, {:.5})",
        report.map.start.lat, report.map.start.lon, report.map.end.lat, report.map.end.lon
    );

    if !report.alternatives.is_empty() {
        println!();
        println!("Other routes:");
        for route in &report.alternatives {
            println!(
                "  - {}: {} ({})",
                route.summary, route.eta_label, route.distance_text
            );
        }
    }
}

fn print_trend(report: &TrendReport) {
    let Some(stats) = &report.stats else {
        println!("Traffic trend data unavailable.");
        return;
    };

    const BAR_WIDTH: f64 = 40.0;
    for sample in &report.samples {
        let width = if stats.peak_eta > 0.0 {
            (sample.eta_minutes / stats.peak_eta * BAR_WIDTH).round() as usize
        } else {
            0
        };
        println!(
            "{}  {:>8.2} min  {}",
            sample.label,
            sample.eta_minutes,
            "#".repeat(width)
        );
    }

    println!();
    println!("Peak ETA:               {:.2} min", stats.peak_eta);
    println!("Average ETA:            {:.2} min", stats.average_eta);
    println!("Congestion peak:        {}", stats.peak_label);
    println!("Smoothest travel window: {}", stats.min_label);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting traffic-eta v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Route {
            from,
            to,
            mode,
            fuel_price,
            efficiency,
        } => {
            let provider = build_provider(&config)?;
            let request = JourneyRequest {
                origin: from,
                destination: to,
                mode,
                fuel_price_per_liter: fuel_price.unwrap_or(config.fuel.price_per_liter),
                efficiency_km_per_liter: efficiency.unwrap_or(config.fuel.efficiency_km_per_liter),
            };

            let report = plan_journey(provider.as_ref(), &request).await?;
            print_journey(&report, &config.fuel.currency);
        }
        Commands::Trend {
            from,
            to,
            mode,
            hours,
        } => {
            let hours = hours.unwrap_or(config.trend.horizon_hours);
            if hours == 0 || hours > MAX_HORIZON_HOURS {
                anyhow::bail!("--hours must be between 1 and {}", MAX_HORIZON_HOURS);
            }

            let provider = build_provider(&config)?;
            let samples =
                sample_trend(provider.as_ref(), &from, &to, mode, hours, Local::now()).await;
            tracing::info!("Collected {} of {} trend samples", samples.len(), hours);
            print_trend(&TrendReport::new(samples));
        }
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            let provider = build_provider(&config)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let app = build_router(AppState::new(provider, config), access_log);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
