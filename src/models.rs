use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

static DEGREES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}\.\d+$").expect("valid degree pattern"));

/// A latitude/longitude pair pulled out of a map link or page.
///
/// Both components are kept as the exact text that was matched, so rendering
/// never loses or adds precision (`-67.890` stays `-67.890`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    lat: String,
    lon: String,
}

impl Coordinate {
    /// Builds a coordinate from two decimal-degree strings.
    ///
    /// Returns `None` unless both look like `-?\d{1,3}\.\d+`.
    pub fn new(lat: &str, lon: &str) -> Option<Self> {
        if !DEGREES.is_match(lat) || !DEGREES.is_match(lon) {
            return None;
        }
        Some(Self {
            lat: lat.to_string(),
            lon: lon.to_string(),
        })
    }

    pub fn lat_text(&self) -> &str {
        &self.lat
    }

    pub fn lon_text(&self) -> &str {
        &self.lon
    }

    pub fn latitude(&self) -> f64 {
        // DEGREES guarantees this parses.
        self.lat.parse().unwrap_or_default()
    }

    pub fn longitude(&self) -> f64 {
        self.lon.parse().unwrap_or_default()
    }

    /// `geo:<lat>,<lon>?q=<lat>,<lon>`
    pub fn to_geo_uri(&self) -> String {
        format!("geo:{0},{1}?q={0},{1}", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_geo_uri())
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Coordinate", 3)?;
        state.serialize_field("geo", &self.to_geo_uri())?;
        state.serialize_field("lat", &self.latitude())?;
        state.serialize_field("lon", &self.longitude())?;
        state.end()
    }
}

/// Outcome of a single non-redirecting GET.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub status: u16,
    /// `Location` header, only when the server sent one.
    pub redirect: Option<String>,
    pub body: Option<String>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
