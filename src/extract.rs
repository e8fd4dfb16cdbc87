//! Coordinate extraction from map links and fetched pages.
//!
//! Both functions are pure: no match is a normal `None`, never an error.

use crate::models::Coordinate;
use regex::Regex;
use std::sync::LazyLock;

// Place links carry the pin inside the `data=` blob as `!3d<lat>!4d<lon>`.
static LAT_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data=.*!3d(-?\d{1,3}\.\d+)").expect("valid lat pattern"));
static LON_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data=.*!4d(-?\d{1,3}\.\d+)").expect("valid lon pattern"));

static PREVIEW_PLACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/maps/preview/place.*@(-?\d{1,3}\.\d+),(-?\d{1,3}\.\d+)")
        .expect("valid preview pattern")
});

/// Pulls the `!3d`/`!4d` pair out of a place URL.
///
/// Both markers must be present; a lone latitude or longitude yields `None`.
pub fn extract_from_url(url: &str) -> Option<Coordinate> {
    let lat = LAT_PARAM.captures(url)?.get(1)?.as_str();
    let lon = LON_PARAM.captures(url)?.get(1)?.as_str();
    Coordinate::new(lat, lon)
}

/// Scans an HTML/JSON body for a `/maps/preview/place...@lat,lon` fragment.
pub fn extract_from_content(text: &str) -> Option<Coordinate> {
    if text.trim().is_empty() {
        return None;
    }
    let caps = PREVIEW_PLACE.captures(text)?;
    Coordinate::new(caps.get(1)?.as_str(), caps.get(2)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACE_URL: &str = "https://www.google.com/maps/place/Eiffel+Tower/@48.8583701,2.2919064,17z/data=!3m1!4b1!4m6!3m5!1s0x47e66e2964e34e2d:0x8ddca9ee380ef7e0!8m2!3d48.8583701!4d2.2944813!16zL20vMDJqODE";

    #[test]
    fn reads_third_and_fourth_data_params() {
        let c = extract_from_url(PLACE_URL).unwrap();
        assert_eq!(c.lat_text(), "48.8583701");
        assert_eq!(c.lon_text(), "2.2944813");
    }

    #[test]
    fn keeps_sign_and_trailing_zeros() {
        let c = extract_from_url("https://maps.example/x?data=!3d-12.340!4d-067.890").unwrap();
        assert_eq!(c.to_geo_uri(), "geo:-12.340,-067.890?q=-12.340,-067.890");
    }

    #[test]
    fn missing_either_marker_is_none() {
        assert!(extract_from_url("https://maps.example/x?data=!3d48.85").is_none());
        assert!(extract_from_url("https://maps.example/x?data=!4d2.29").is_none());
        assert!(extract_from_url("https://maps.example/x?data=!1s0x0").is_none());
    }

    #[test]
    fn markers_outside_data_blob_are_ignored() {
        assert!(extract_from_url("https://maps.example/x/!3d48.85!4d2.29").is_none());
    }

    #[test]
    fn url_without_decimal_fraction_is_none() {
        assert!(extract_from_url("https://maps.example/x?data=!3d48!4d2").is_none());
    }

    #[test]
    fn short_links_do_not_match() {
        assert!(extract_from_url("https://maps.app.goo.gl/AbCdEf123").is_none());
        assert!(extract_from_url("").is_none());
    }

    #[test]
    fn finds_preview_place_in_body() {
        let body = r#"<html><head><link href="/maps/preview/place/Eiffel+Tower/@48.8583701,2.2944813,17z/data=!4m2" rel="preload"></head></html>"#;
        let c = extract_from_content(body).unwrap();
        assert_eq!(c.to_geo_uri(), "geo:48.8583701,2.2944813?q=48.8583701,2.2944813");
    }

    #[test]
    fn blank_body_is_none() {
        assert!(extract_from_content("").is_none());
        assert!(extract_from_content("   \n\t").is_none());
    }

    #[test]
    fn unrelated_body_is_none() {
        assert!(extract_from_content("<html>consent.google.com</html>").is_none());
        assert!(extract_from_content("@48.85,2.29 without the path").is_none());
    }
}
