use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use metro_server::engine::Engine;
use metro_server::home::JsonFileHomeStore;
use metro_server::stations::{StationDirectory, read_dataset};
use metro_server::web::{AppState, create_router};
use metro_server::wmata::{CacheConfig, CachedFeed, WmataClient, WmataConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Get configuration from environment
    let api_key = std::env::var("WMATA_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: WMATA_API_KEY not set. Feed calls will fail.");
        String::new()
    });
    let stations_path =
        std::env::var("STATIONS_FILE").unwrap_or_else(|_| "data/stations.json".to_string());
    let homes_path =
        std::env::var("HOME_STORE_FILE").unwrap_or_else(|_| "data/homes.json".to_string());

    // Load the station directory (fail fast: nothing works without it)
    let dataset = read_dataset(&stations_path).expect("Failed to read station dataset");
    let directory =
        Arc::new(StationDirectory::from_dataset(dataset).expect("Failed to build station directory"));
    println!(
        "Loaded {} station rows across {} lines",
        directory.row_count(),
        directory.lines().count()
    );

    // Create the feed client with caching for slow-moving data
    let client = WmataClient::new(WmataConfig::new(&api_key)).expect("Failed to create feed client");
    let feed = CachedFeed::new(client, &CacheConfig::default());

    // Open the home-station store
    let home = JsonFileHomeStore::open(&homes_path).expect("Failed to open home store");

    // Build app state
    let engine = Engine::new(directory, feed, home);
    let state = AppState::new(engine);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Metro tracker listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health     - Health check");
    println!("  GET  /times      - Upcoming arrivals for a spoken trip");
    println!("  GET  /estimate   - Travel time between two stations");
    println!("  GET  /incidents  - Current incidents, filtered by line/kind");
    println!("  GET  /home       - The rider's stored home station");
    println!("  POST /home       - Set the rider's home station");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
