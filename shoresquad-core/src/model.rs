use chrono::NaiveDate;

/// Geographic position in floating-point degrees.
///
/// Resolved once at startup and used unchanged as the map center and the
/// weather query key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Render as the `"lat,lng"` pair the weather provider expects.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One day of the fetched forecast, read-only after decode.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub max_wind_kph: f64,
    pub total_precip_mm: f64,
    pub condition_text: String,
    pub condition_icon_url: String,
}

/// A cleanup event as held in the session store.
///
/// Created by the events fetch, mutated in place when the user joins,
/// never persisted beyond the session.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub location: Coordinate,
    pub joined: bool,
}
