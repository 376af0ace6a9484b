use super::root_folder;
use crate::arr::{
    lenient_int, AddPayload, ArtistAddOptions, ArtistPayload, MovieAddOptions, MoviePayload,
    ProviderRegistry, SeriesAddOptions, SeriesPayload,
};
use requestarr_core::{Error, ExternalId, MediaKind, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /request`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddRequest {
    pub id: Option<ExternalId>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Only a positive number, or a string that parses as one, is kept
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
}

fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_int::<D, i32>(deserializer)?.filter(|y| *y > 0))
}

impl AddRequest {
    pub fn new(id: impl Into<ExternalId>, title: &str, kind: &str) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.to_string()),
            kind: Some(kind.to_string()),
            year: None,
        }
    }

    fn validate(&self) -> Result<(&ExternalId, &str, MediaKind)> {
        let id = self.id.as_ref().filter(|id| !id.is_blank());
        let title = self.title.as_deref().filter(|t| !t.trim().is_empty());
        let kind = self.kind.as_deref().filter(|k| !k.trim().is_empty());

        match (id, title, kind) {
            (Some(id), Some(title), Some(kind)) => Ok((id, title, kind.parse()?)),
            _ => Err(Error::missing("Missing ID, title, or type")),
        }
    }
}

/// Confirmation returned after a successful add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddConfirmation {
    pub message: String,
}

/// URL slug for a series title: lowercased, each space replaced by `-`.
pub fn title_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

fn numeric_id(kind: MediaKind, id: &ExternalId) -> Result<i64> {
    id.as_i64().filter(|n| *n > 0).ok_or_else(|| {
        Error::validation(format!(
            "{} must be a positive integer, got {:?}",
            kind.external_id_field(),
            id.to_string()
        ))
    })
}

/// Build the provider-specific add payload for `kind`.
pub fn build_payload(
    kind: MediaKind,
    id: &ExternalId,
    title: &str,
    year: Option<i32>,
    quality_profile_id: u32,
    root_folder_path: String,
) -> Result<AddPayload> {
    let payload = match kind {
        MediaKind::Tv => AddPayload::Series(SeriesPayload {
            tvdb_id: numeric_id(kind, id)?,
            title: title.to_string(),
            title_slug: title_slug(title),
            quality_profile_id,
            root_folder_path,
            monitored: true,
            add_options: SeriesAddOptions {
                search_for_missing_episodes: true,
            },
        }),
        MediaKind::Movie => AddPayload::Movie(MoviePayload {
            tmdb_id: numeric_id(kind, id)?,
            title: title.to_string(),
            year: year.filter(|y| *y > 0),
            quality_profile_id,
            root_folder_path,
            monitored: true,
            add_options: MovieAddOptions {
                search_for_movie: true,
            },
        }),
        MediaKind::Music => AddPayload::Artist(ArtistPayload {
            foreign_artist_id: id.to_string(),
            artist_name: title.to_string(),
            quality_profile_id,
            root_folder_path,
            monitored: true,
            add_options: ArtistAddOptions {
                search_for_missing_albums: true,
            },
        }),
    };
    Ok(payload)
}

/// Validate an add request, resolve a root folder and submit it to the
/// provider serving its kind.
pub async fn handle_add(
    registry: &ProviderRegistry,
    request: &AddRequest,
) -> Result<AddConfirmation> {
    let (id, title, kind) = request.validate()?;
    if kind.uses_numeric_id() {
        numeric_id(kind, id)?;
    }

    let client = registry.get(kind)?;
    let root_folder_path = root_folder::resolve(client).await?;
    let payload = build_payload(
        kind,
        id,
        title,
        request.year,
        client.quality_profile_id(),
        root_folder_path,
    )?;

    let outcome = client.add_item(&payload).await?;
    if !outcome.success {
        tracing::warn!(
            "{} rejected add of {:?}: {} {}",
            kind.provider_name(),
            title,
            outcome.status,
            outcome.provider_message
        );
        return Err(Error::ProviderCallFailed {
            kind,
            status: outcome.status,
            body: outcome.provider_message,
        });
    }

    tracing::info!("Added {} {:?} to {}", kind, title, kind.provider_name());
    Ok(AddConfirmation {
        message: format!(
            "{} '{}' added to {}!",
            kind.item_noun(),
            title,
            kind.provider_name()
        ),
    })
}
