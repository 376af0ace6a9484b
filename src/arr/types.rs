use crate::normalize::SearchResultItem;
use requestarr_core::{ExternalId, MediaKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

const NO_OVERVIEW: &str = "No overview available.";

/// One entry of a provider lookup response.
///
/// The three providers share most field names; kind-specific ids are all
/// optional so one shape decodes every lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupItem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub images: Vec<LookupImage>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub genres: Vec<String>,
    pub ratings: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub statistics: Option<LookupStatistics>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub tvdb_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub tmdb_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub foreign_artist_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupImage {
    #[serde(default, deserialize_with = "lenient")]
    pub cover_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub remote_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStatistics {
    #[serde(default, deserialize_with = "lenient_int")]
    pub season_count: Option<u32>,
}

/// A value of the wrong shape decodes as `None` instead of failing the
/// whole lookup.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Integer from a JSON integer or a string holding one. Anything else,
/// including out-of-range values, is `None`.
pub(crate) fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let n = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(n.and_then(|n| T::try_from(n).ok()))
}

impl LookupItem {
    /// External id taken from the field `kind` keys its catalog by.
    pub fn external_id(&self, kind: MediaKind) -> Option<ExternalId> {
        match kind {
            MediaKind::Tv => self.tvdb_id.filter(|id| *id > 0).map(ExternalId::Numeric),
            MediaKind::Movie => self.tmdb_id.filter(|id| *id > 0).map(ExternalId::Numeric),
            MediaKind::Music => self
                .foreign_artist_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .map(ExternalId::Text),
        }
    }

    /// URL of the first poster image in upstream order.
    pub fn poster_url(&self) -> Option<String> {
        self.images
            .iter()
            .find(|img| img.cover_type.as_deref() == Some("poster"))
            .and_then(|img| img.remote_url.clone().or_else(|| img.url.clone()))
    }

    /// Map to the uniform search result shape.
    pub fn into_uniform(self, kind: MediaKind) -> SearchResultItem {
        let external_id = self.external_id(kind);
        let poster_url = self.poster_url();

        let title = match kind {
            MediaKind::Music => self.artist_name.or(self.title),
            _ => self.title.or(self.artist_name),
        }
        .unwrap_or_default();

        let overview = self
            .overview
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| NO_OVERVIEW.to_string());

        let ratings = match self.ratings {
            Some(v) if !v.is_null() => v,
            _ => serde_json::Value::Object(Default::default()),
        };

        let season_count = match kind {
            MediaKind::Tv => self.statistics.and_then(|s| s.season_count),
            _ => None,
        };

        SearchResultItem {
            external_id,
            title,
            year: self.year.filter(|y| *y > 0),
            overview,
            poster_url,
            genres: self.genres,
            ratings,
            season_count,
        }
    }
}

/// Storage root reported by a provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFolder {
    pub id: Option<i64>,
    pub path: Option<String>,
}

/// Body posted to a provider's add endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AddPayload {
    Series(SeriesPayload),
    Movie(MoviePayload),
    Artist(ArtistPayload),
}

impl AddPayload {
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Series(_) => MediaKind::Tv,
            Self::Movie(_) => MediaKind::Movie,
            Self::Artist(_) => MediaKind::Music,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPayload {
    pub tvdb_id: i64,
    pub title: String,
    pub title_slug: String,
    pub quality_profile_id: u32,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: SeriesAddOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAddOptions {
    pub search_for_missing_episodes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    pub tmdb_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub quality_profile_id: u32,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: MovieAddOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieAddOptions {
    pub search_for_movie: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPayload {
    pub foreign_artist_id: String,
    pub artist_name: String,
    pub quality_profile_id: u32,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: ArtistAddOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistAddOptions {
    pub search_for_missing_albums: bool,
}

/// Result of posting an add payload. Non-2xx answers are not errors here.
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub success: bool,
    pub status: u16,
    pub provider_message: String,
}
