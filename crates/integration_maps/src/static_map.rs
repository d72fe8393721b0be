//! Static map URL builders
//!
//! Compose markers and an already simplified route path into the request URL
//! of a non-interactive map image. Nothing is fetched here.

use domain::{Coordinate, MapMarkers};
use url::form_urlencoded;

use crate::{config::StaticMapConfig, error::MapsError, polyline};

const YANDEX_STATIC_URL: &str = "https://static-maps.yandex.ru/1.x/";
const GOOGLE_STATIC_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Route line style: colour `#1a73e8`, width 4
const YANDEX_LINE_STYLE: &str = "c:1a73e8,w:4";

/// Yandex static maps (`pt` markers, `pl` polyline)
#[derive(Debug, Clone)]
pub struct YandexStaticMap {
    base_url: String,
    api_key: Option<String>,
    size: String,
    max_path_points: usize,
}

impl YandexStaticMap {
    /// Create a builder from configuration
    #[must_use]
    pub fn new(config: &StaticMapConfig) -> Self {
        Self {
            base_url: non_empty_or(&config.base_url, YANDEX_STATIC_URL),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            size: format!("{},{}", config.width, config.height),
            max_path_points: config.max_path_points,
        }
    }

    /// Maximum number of path points this builder expects
    #[must_use]
    pub const fn max_path_points(&self) -> usize {
        self.max_path_points
    }

    /// The Yandex static API serves unkeyed requests, so this never fails
    pub const fn ensure_configured(&self) -> Result<(), MapsError> {
        Ok(())
    }

    /// Build the image URL
    ///
    /// Markers: origin `pm2gnl`, optional waypoint `pm2blm`, destination
    /// `pm2rdm`, joined by `~`. The path is drawn as `pl` in `lon,lat` order.
    #[must_use]
    pub fn build_url(&self, markers: &MapMarkers, path: &[Coordinate]) -> String {
        let mut params: Vec<(&str, String)> =
            vec![("l", "map".to_string()), ("size", self.size.clone())];

        if let Some(key) = &self.api_key {
            params.push(("apikey", key.clone()));
        }

        let mut pt = vec![format!("{},pm2gnl", markers.origin.to_lon_lat_string())];
        if let Some(waypoint) = markers.waypoint {
            pt.push(format!("{},pm2blm", waypoint.to_lon_lat_string()));
        }
        pt.push(format!("{},pm2rdm", markers.destination.to_lon_lat_string()));
        params.push(("pt", pt.join("~")));

        if !path.is_empty() {
            let coords = path
                .iter()
                .map(Coordinate::to_lon_lat_string)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("pl", format!("{YANDEX_LINE_STYLE},{coords}")));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_keeping_separators(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{query}", self.base_url)
    }
}

/// Google static maps (`path=enc:` polyline, lettered markers)
#[derive(Debug, Clone)]
pub struct GoogleStaticMap {
    base_url: String,
    api_key: Option<String>,
    size: String,
    max_path_points: usize,
}

impl GoogleStaticMap {
    /// Create a builder from configuration
    #[must_use]
    pub fn new(config: &StaticMapConfig) -> Self {
        Self {
            base_url: non_empty_or(&config.base_url, GOOGLE_STATIC_URL),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            size: format!("{}x{}", config.width, config.height),
            max_path_points: config.max_path_points,
        }
    }

    /// Maximum number of path points this builder expects
    #[must_use]
    pub const fn max_path_points(&self) -> usize {
        self.max_path_points
    }

    /// Google refuses unkeyed static map requests
    pub fn ensure_configured(&self) -> Result<(), MapsError> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err(MapsError::MissingApiKey("GOOGLE_MAPS_API_KEY".to_string())),
        }
    }

    /// Build the image URL
    ///
    /// Markers are labelled positionally: green `A` for the origin, then blue
    /// `B` for a waypoint and red `C` for the destination, or red `B` for the
    /// destination when there is no waypoint.
    #[must_use]
    pub fn build_url(&self, markers: &MapMarkers, path: &[Coordinate]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if !path.is_empty() {
            query.append_pair("path", &format!("enc:{}", polyline::encode(path)));
        }

        query.append_pair(
            "markers",
            &format!("color:green|label:A|{}", markers.origin.to_lat_lon_string()),
        );
        let destination_label = match markers.waypoint {
            Some(waypoint) => {
                query.append_pair(
                    "markers",
                    &format!("color:blue|label:B|{}", waypoint.to_lat_lon_string()),
                );
                "C"
            },
            None => "B",
        };
        query.append_pair(
            "markers",
            &format!(
                "color:red|label:{destination_label}|{}",
                markers.destination.to_lat_lon_string()
            ),
        );

        query.append_pair("size", &self.size);
        query.append_pair("maptype", "roadmap");
        query.append_pair("key", self.api_key.as_deref().unwrap_or_default());

        format!("{}?{}", self.base_url, query.finish())
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Form-encode `value`, leaving `:`, `,` and `~` readable
fn encode_keeping_separators(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut buf = [0_u8; 4];
    for ch in value.chars() {
        if matches!(ch, ':' | ',' | '~') {
            out.push(ch);
        } else {
            out.extend(form_urlencoded::byte_serialize(
                ch.encode_utf8(&mut buf).as_bytes(),
            ));
        }
    }
    out
}
