//! S-Miles Cloud API client and plant metric collection.

mod client;
mod collector;
mod envelope;
mod metrics;
mod plants;
mod session;
mod transport;

pub use client::Client;
pub use collector::PlantMetricCollector;

/// Login endpoint. Requests to it never carry a session token.
pub const LOGIN_PATH: &str = "iam/pub/0/auth/login";
/// Paged listing of the account's plants.
pub const STATIONS_PATH: &str = "pvm/api/0/station/select_by_page";
/// Real-time counters for a single plant.
pub const STATION_DATA_PATH: &str = "pvm-data/api/0/station/data/count_station_real_data";
