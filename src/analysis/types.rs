use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One completed exercise session as returned by the platform's activity API.
///
/// Field names follow the wire format. Workouts are immutable once fetched;
/// they live only for the duration of a single orchestration run.
#[derive(Debug, Clone, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sport_type: String,
    /// Meters.
    pub distance: f64,
    /// Meters.
    pub total_elevation_gain: f64,
    /// Seconds. Unsigned on purpose: a negative moving time is rejected at
    /// the deserialization boundary.
    #[serde(rename = "moving_time")]
    pub duration: u32,
    /// Lap order is insertion order; the list endpoint may omit laps entirely.
    #[serde(default)]
    pub laps: Vec<Lap>,
    #[serde(rename = "start_latlng", default)]
    start_latlng: Vec<f64>,
    /// Meters per second.
    pub average_speed: f64,
    /// Beats per minute, zero when the workout carries no heart-rate data.
    #[serde(rename = "average_heartrate", default)]
    pub heart_rate: f64,
    #[serde(rename = "start_date")]
    pub date: DateTime<Utc>,
}

impl Workout {
    /// Starting location as a (latitude, longitude) pair, when present.
    /// The API sends an empty array for indoor workouts.
    pub fn start_location(&self) -> Option<(f64, f64)> {
        match self.start_latlng.as_slice() {
            [lat, lng, ..] => Some((*lat, *lng)),
            _ => None,
        }
    }
}

/// A sub-segment of a workout. Laps have no identity of their own and exist
/// only inside a workout's lap sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lap {
    #[serde(default)]
    pub max_speed: f64,
    #[serde(default)]
    pub average_speed: f64,
    #[serde(default)]
    pub average_cadence: f64,
    #[serde(rename = "average_heartrate", default)]
    pub average_heart_rate: f64,
}
