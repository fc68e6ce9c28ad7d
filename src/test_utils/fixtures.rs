//! Canned S-Miles Cloud responses and common test data.

use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Value};
use wiremock::ResponseTemplate;

/// A fixed collection timestamp.
pub fn test_timestamp() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// An HTTP 200 response carrying an API envelope.
pub fn envelope(status: &str, message: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": status,
        "message": message,
        "data": data,
        "systemNotice": null,
    }))
}

/// A successful login handing out `token`.
pub fn login_success(token: &str) -> ResponseTemplate {
    envelope("0", "success", json!({ "token": token }))
}

/// A plant listing page with `(id, name, time zone)` entries.
pub fn plants_page(plants: &[(u64, &str, &str)]) -> ResponseTemplate {
    let list: Vec<Value> = plants
        .iter()
        .map(|(id, name, tz)| json!({ "id": id, "name": name, "timezone": tz }))
        .collect();
    envelope("0", "success", json!({ "list": list }))
}

/// Real-time data of a plant, with numbers as strings like the API sends them.
pub fn plant_data(
    real_power: &str,
    today_eq: &str,
    total_eq: &str,
    capacitor: &str,
    last_data_time: &str,
) -> ResponseTemplate {
    envelope(
        "0",
        "success",
        json!({
            "real_power": real_power,
            "today_eq": today_eq,
            "total_eq": total_eq,
            "capacitor": capacitor,
            "last_data_time": last_data_time,
        }),
    )
}
