//! Routing preference value object

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Driving route preference chosen by the caller
///
/// Each preference maps to exactly one entry of a fixed query-parameter
/// table; see [`RoutePreference::query_params`]. Unknown wire values are
/// treated as [`RoutePreference::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    /// No preference
    #[default]
    None,
    /// Avoid toll roads
    AvoidTolls,
    /// Prefer the shorter route
    Short,
    /// Prefer the faster route, using live traffic
    Fast,
}

impl RoutePreference {
    /// Parse a wire value leniently
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("avoid_tolls") => Self::AvoidTolls,
            Some("short") => Self::Short,
            Some("fast") => Self::Fast,
            _ => Self::None,
        }
    }

    /// Provider query parameters for this preference
    #[must_use]
    pub const fn query_params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::AvoidTolls => &[("avoid", "tolls")],
            Self::Short => &[("avoid", "ferries")],
            Self::Fast => &[("departure_time", "now")],
            Self::None => &[],
        }
    }

    /// Wire label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::AvoidTolls => "avoid_tolls",
            Self::Short => "short",
            Self::Fast => "fast",
        }
    }
}

impl<'de> Deserialize<'de> for RoutePreference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Self::parse(value.as_deref()))
    }
}

impl fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
