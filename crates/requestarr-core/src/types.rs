//! Core type definitions for media kinds and catalog identifiers.
//!
//! Media kinds are serialized in lowercase, matching the `type` parameter the
//! web UI sends (`tv`, `movie`, `music`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of media a user can search for and request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// TV series, managed by Sonarr.
    Tv,
    /// Movies, managed by Radarr.
    Movie,
    /// Music artists, managed by Lidarr.
    Music,
}

impl MediaKind {
    /// Every kind, in display order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Tv, MediaKind::Movie, MediaKind::Music];

    /// Display name of the provider that handles this kind.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Tv => "Sonarr",
            Self::Movie => "Radarr",
            Self::Music => "Lidarr",
        }
    }

    /// Noun used in user-facing confirmation messages.
    pub fn item_noun(&self) -> &'static str {
        match self {
            Self::Tv => "TV Show",
            Self::Movie => "Movie",
            Self::Music => "Artist",
        }
    }

    /// Name of the provider field that carries the external id for this kind.
    pub fn external_id_field(&self) -> &'static str {
        match self {
            Self::Tv => "tvdbId",
            Self::Movie => "tmdbId",
            Self::Music => "foreignArtistId",
        }
    }

    /// Whether this kind's external ids are numeric catalog ids.
    pub fn uses_numeric_id(&self) -> bool {
        matches!(self, Self::Tv | Self::Movie)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tv => write!(f, "tv"),
            Self::Movie => write!(f, "movie"),
            Self::Music => write!(f, "music"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tv" => Ok(Self::Tv),
            "movie" => Ok(Self::Movie),
            "music" => Ok(Self::Music),
            _ => Err(crate::Error::Validation("Invalid media type".into())),
        }
    }
}

/// Provider catalog identifier.
///
/// Sonarr and Radarr key titles by integer TVDB/TMDB ids, Lidarr by
/// MusicBrainz id strings. Serialized untagged so the JSON type survives a
/// search → request round trip through the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Numeric(i64),
    Text(String),
}

impl ExternalId {
    /// Returns `true` for ids a caller could not have meant (`0`, `""`).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Numeric(n) => *n == 0,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Integer form of the id, accepting numeric strings such as `"81189"`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ExternalId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for ExternalId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
