//! Static map adapter - Implements StaticMapPort using integration_maps

use application::{ApplicationError, ports::StaticMapPort};
use domain::{Coordinate, MapMarkers};
use integration_maps::{GoogleStaticMap, StaticMapConfig, YandexStaticMap};

use super::{Lookup, map_maps_error};

/// Static map URL builder for the configured provider
#[derive(Debug, Clone)]
pub enum StaticMapAdapter {
    /// Yandex static maps
    Yandex(YandexStaticMap),
    /// Google static maps
    Google(GoogleStaticMap),
}

impl StaticMapAdapter {
    /// Yandex builder from configuration
    #[must_use]
    pub fn yandex(config: &StaticMapConfig) -> Self {
        Self::Yandex(YandexStaticMap::new(config))
    }

    /// Google builder from configuration
    #[must_use]
    pub fn google(config: &StaticMapConfig) -> Self {
        Self::Google(GoogleStaticMap::new(config))
    }
}

impl StaticMapPort for StaticMapAdapter {
    fn build_url(&self, markers: &MapMarkers, path: &[Coordinate]) -> String {
        match self {
            Self::Yandex(builder) => builder.build_url(markers, path),
            Self::Google(builder) => builder.build_url(markers, path),
        }
    }

    fn max_path_points(&self) -> usize {
        match self {
            Self::Yandex(builder) => builder.max_path_points(),
            Self::Google(builder) => builder.max_path_points(),
        }
    }

    fn ensure_configured(&self) -> Result<(), ApplicationError> {
        match self {
            Self::Yandex(builder) => builder.ensure_configured(),
            Self::Google(builder) => builder.ensure_configured(),
        }
        .map_err(|e| map_maps_error(e, Lookup::Route))
    }
}
