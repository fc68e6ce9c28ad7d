//! Plant listing and per-plant readings.
//!
//! The API reports most numbers as strings and timestamps as local wall-clock
//! time of the plant. Numbers that do not parse are read as zero so one bad
//! field does not cost the whole cycle.

use crate::error::SmilesError;
use crate::smiles::client::Client;
use crate::smiles::{STATIONS_PATH, STATION_DATA_PATH};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize as _;
use serde_derive::Deserialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIME_ZONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| {
        Regex::new(r"UTC([+-])(\d{2})(?::?(\d{2}))?(?:$|\D)").expect("valid regex")
    });

/// A plant as returned by the listing call.
///
/// Only `id` must be well-formed. A name or time zone of the wrong type reads
/// as empty, which later falls back to UTC for that plant alone.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PlantSummary {
    #[serde(deserialize_with = "integral_id")]
    pub id: u64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Label such as `UTC+08`.
    #[serde(rename = "timezone", default, deserialize_with = "string_or_empty")]
    pub time_zone: String,
}

/// Accepts `4711`, `4711.0` and `"4711"`.
fn integral_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| D::Error::custom(format!("invalid plant id: {}", value)))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

#[derive(Deserialize, Debug, Default)]
struct PlantPage {
    #[serde(default)]
    list: Vec<PlantSummary>,
}

#[derive(Deserialize, Debug, Default)]
struct RawPlantData {
    #[serde(default)]
    real_power: Value,
    #[serde(default)]
    today_eq: Value,
    #[serde(default)]
    total_eq: Value,
    #[serde(default)]
    capacitor: Value,
    #[serde(default)]
    last_data_time: Value,
}

/// Instantaneous state of one plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantReading {
    pub plant_id: u64,
    /// Current output in W.
    pub power: f64,
    pub energy_today: f64,
    /// Lifetime energy including today.
    pub energy_total: f64,
    /// Rated capacity in W.
    pub max_power: f64,
    pub last_update: Option<DateTime<Utc>>,
}

impl Client {
    /// Lists the account's plants. Only the first page is read.
    pub async fn list_plants(&self) -> Result<Vec<PlantSummary>, SmilesError> {
        tracing::info!("Querying plant information …");
        let page: PlantPage = self
            .call(
                STATIONS_PATH,
                json!({ "page": 1, "page_size": self.page_size }),
            )
            .await?;

        if page.list.len() >= self.page_size as usize {
            tracing::warn!(
                "Plant listing filled a whole page ({}); further plants are ignored",
                self.page_size
            );
        }
        Ok(page.list)
    }

    pub async fn fetch_reading(&self, plant: &PlantSummary) -> Result<PlantReading, SmilesError> {
        tracing::info!("Querying data for plant ID {} …", plant.id);
        let data: RawPlantData = self
            .call(STATION_DATA_PATH, json!({ "sid": plant.id }))
            .await?;
        Ok(to_reading(plant, &data))
    }
}

fn to_reading(plant: &PlantSummary, data: &RawPlantData) -> PlantReading {
    let energy_today = parse_number(&data.today_eq);
    let energy_total = parse_number(&data.total_eq);

    let last_update = match data.last_data_time.as_str() {
        Some(text) => {
            let parsed = parse_last_update(text, &plant.time_zone);
            if parsed.is_none() {
                tracing::warn!(
                    "Unparseable last update time '{}' for plant ID {}",
                    text,
                    plant.id
                );
            }
            parsed
        }
        None => None,
    };

    PlantReading {
        plant_id: plant.id,
        power: parse_number(&data.real_power),
        energy_today,
        energy_total: energy_total + energy_today,
        max_power: parse_number(&data.capacitor) * 1000.0,
        last_update,
    }
}

/// Reads a numeric field that may be a JSON number or a numeric string.
pub fn parse_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parses a `UTC±HH` (optionally `UTC±HH:MM`) label, falling back to UTC.
pub fn parse_utc_offset(label: &str) -> FixedOffset {
    let utc = Utc.fix();
    let Some(caps) = TIME_ZONE_REGEX.captures(label) else {
        return utc;
    };

    let hours: i32 = caps[2].parse().unwrap_or(0);
    let minutes: i32 = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
    let seconds = hours * 3600 + minutes * 60;
    let seconds = if &caps[1] == "-" { -seconds } else { seconds };

    FixedOffset::east_opt(seconds).unwrap_or(utc)
}

/// Interprets `text` as wall-clock time in the zone named by `time_zone`.
pub fn parse_last_update(text: &str, time_zone: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), LAST_UPDATE_FORMAT).ok()?;
    parse_utc_offset(time_zone)
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}
