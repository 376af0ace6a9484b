use crate::arr::ArrClient;
use requestarr_core::{Error, Result};

/// Pick the storage root for a new item: the provider's first root folder.
///
/// Resolved on every add so folders changed in the provider take effect
/// without a restart.
pub async fn resolve(client: &dyn ArrClient) -> Result<String> {
    let kind = client.kind();
    let folders = client.list_root_folders().await?;

    let path = folders
        .into_iter()
        .next()
        .and_then(|f| f.path)
        .filter(|p| !p.trim().is_empty());

    match path {
        Some(path) => {
            tracing::debug!("Using {} root folder {}", kind.provider_name(), path);
            Ok(path)
        }
        None => {
            tracing::warn!("{} reported no root folders", kind.provider_name());
            Err(Error::NoRootFolder { kind })
        }
    }
}
