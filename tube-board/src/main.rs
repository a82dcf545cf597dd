use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tube_board::board::{ArrivalFilter, Board, BoardConfig, BusStop, SingleStation, Station};
use tube_board::cache::{CacheConfig, CachedTransitApi};
use tube_board::domain::{LondonClock, Mode};
use tube_board::favourites::FavouritesStore;
use tube_board::holidays::{
    HolidayCache, HolidayCacheConfig, HolidayClient, HolidayClientConfig, load_calendar,
};
use tube_board::tfl::{TflClient, TflConfig};

const USAGE: &str = "usage: tube-board <naptan> <mode> [name] [line] [destination]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(naptan), Some(mode)) = (args.first(), args.get(1)) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let mode = Mode::parse(mode);
    let name = args.get(2).cloned().unwrap_or_else(|| naptan.clone());
    let filter = ArrivalFilter::from_selection(
        args.get(3).map(String::as_str).unwrap_or(""),
        args.get(4).map(String::as_str).unwrap_or(""),
    );

    // Upstream client
    let mut tfl_config = TflConfig::new();
    match std::env::var("TFL_APP_KEY") {
        Ok(key) => tfl_config = tfl_config.with_app_key(key),
        Err(_) => warn!("TFL_APP_KEY not set, requests will be rate limited"),
    }
    if let Ok(base_url) = std::env::var("TFL_BASE_URL") {
        tfl_config = tfl_config.with_base_url(base_url);
    }
    let tfl_client = match TflClient::new(tfl_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create TfL client: {e}");
            std::process::exit(1);
        }
    };
    let api = Arc::new(CachedTransitApi::new(tfl_client, &CacheConfig::default()));

    // Holiday calendar, optional
    let data_dir = std::env::var("TUBE_BOARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let holiday_cache = HolidayCache::new(HolidayCacheConfig::new(data_dir.join("holidays_cache.json")));
    let calendar = match HolidayClient::new(HolidayClientConfig::default()) {
        Ok(client) => load_calendar(&client, &holiday_cache).await,
        Err(e) => {
            warn!(error = %e, "Failed to create holiday client");
            None
        }
    };

    let mut station = match mode {
        Mode::Bus => Station::BusStop(BusStop::new(name, naptan.as_str())),
        _ => Station::Single(SingleStation::new(name, naptan.as_str(), mode)),
    };

    let favourites = FavouritesStore::new(data_dir.join("favourites.json"));
    match favourites.load() {
        Ok(set) => set.apply_to(&mut station),
        Err(e) => warn!(error = %e, path = ?favourites.path(), "Failed to load favourites"),
    }

    let board = Board::new(
        api,
        station,
        BoardConfig::default(),
        Arc::new(LondonClock),
        Arc::new(calendar),
    );

    info!(station = %board.station().readable_name(), mode = %mode, "Loading board");
    board.reload().await;

    let favourite = match board.station().favourite_state() {
        Some(true) => " *",
        _ => "",
    };
    println!("{}{}", board.station().readable_name(), favourite);
    println!();

    for row in board.grouped(&filter).await {
        let line = row.line_id.as_deref().unwrap_or("");
        let secondary = row.secondary().unwrap_or_default();
        println!(
            "{:<20} {:<30} {:>8}  {}",
            line,
            row.destination,
            row.primary().unwrap_or(""),
            secondary
        );
    }

    let rendered = board.render(&filter).await;
    if !rendered.timetabled.is_empty() {
        println!();
        println!("Timetabled");
        for arrival in &rendered.timetabled {
            println!(
                "{:<20} {:<30} {:>8}",
                arrival.line_id().unwrap_or(""),
                arrival.readable_destination_name(),
                arrival.display()
            );
        }
    }
}
