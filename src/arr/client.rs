use super::types::{AddOutcome, AddPayload, LookupItem, RootFolder};
use crate::config::ProviderConfig;
use crate::normalize::SearchResultItem;
use requestarr_core::{Error, MediaKind, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Common trait for *arr API clients
#[async_trait::async_trait]
pub trait ArrClient: Send + Sync {
    /// Media kind this client serves
    fn kind(&self) -> MediaKind;

    /// Quality profile assigned to items this client adds
    fn quality_profile_id(&self) -> u32;

    /// Test the connection to the *arr instance
    async fn test_connection(&self) -> Result<bool>;

    /// Search the provider's catalog by free text
    async fn lookup(&self, term: &str) -> Result<Vec<LookupItem>>;

    /// List the storage roots new items can be placed under
    async fn list_root_folders(&self) -> Result<Vec<RootFolder>>;

    /// Submit an add payload
    async fn add_item(&self, payload: &AddPayload) -> Result<AddOutcome>;

    /// Map a raw lookup entry to the uniform shape
    fn to_uniform_item(&self, raw: LookupItem) -> SearchResultItem {
        raw.into_uniform(self.kind())
    }
}

/// Create an appropriate client based on config
pub fn create_client(
    kind: MediaKind,
    config: &ProviderConfig,
    timeout: Duration,
) -> Box<dyn ArrClient> {
    match kind {
        MediaKind::Tv => Box::new(SonarrClient::new(config, timeout)),
        MediaKind::Movie => Box::new(RadarrClient::new(config, timeout)),
        MediaKind::Music => Box::new(LidarrClient::new(config, timeout)),
    }
}

struct BaseArrClient {
    kind: MediaKind,
    client: Client,
    base_url: String,
    api_key: String,
    api_version: &'static str,
    quality_profile_id: u32,
}

impl BaseArrClient {
    fn new(
        kind: MediaKind,
        api_version: &'static str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            kind,
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version,
            quality_profile_id: config.quality_profile_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}{}", self.base_url, self.api_version, path)
    }

    fn unreachable(&self, e: reqwest::Error) -> Error {
        tracing::warn!("{} request failed: {}", self.kind.provider_name(), e);
        Error::unreachable(self.kind, e.to_string())
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        tracing::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    /// GET a JSON document. Non-2xx statuses and undecodable bodies are errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.get(path, query).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.unreachable(e))?;

        if !status.is_success() {
            tracing::warn!(
                "{} returned {} for {}",
                self.kind.provider_name(),
                status,
                path
            );
            return Err(Error::ProviderCallFailed {
                kind: self.kind,
                status: status.as_u16(),
                body,
            });
        }

        let body = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!(
                "{} sent an undecodable body for {}: {}",
                self.kind.provider_name(),
                path,
                e
            );
            Error::invalid_response(self.kind, e.to_string())
        })
    }

    async fn lookup(&self, path: &str, term: &str) -> Result<Vec<LookupItem>> {
        let items: Option<Vec<LookupItem>> = self.get_json(path, &[("term", term)]).await?;
        Ok(items.unwrap_or_default())
    }

    async fn test_connection(&self) -> Result<bool> {
        let response = self.get("/system/status", &[]).await?;
        Ok(response.status().is_success())
    }

    async fn list_root_folders(&self) -> Result<Vec<RootFolder>> {
        let folders: Option<Vec<RootFolder>> = self.get_json("/rootfolder", &[]).await?;
        Ok(folders.unwrap_or_default())
    }

    async fn post_add(&self, path: &str, payload: &AddPayload) -> Result<AddOutcome> {
        if payload.kind() != self.kind {
            return Err(Error::Internal(format!(
                "{} payload sent to {}",
                payload.kind(),
                self.kind.provider_name()
            )));
        }

        let url = self.url(path);
        tracing::debug!("POST {} payload: {:?}", url, payload);

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        tracing::debug!("POST {} -> {}", url, status);
        let provider_message = response.text().await.unwrap_or_default();

        Ok(AddOutcome {
            success: status.is_success(),
            status: status.as_u16(),
            provider_message,
        })
    }
}

pub struct SonarrClient(BaseArrClient);

impl SonarrClient {
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Self {
        Self(BaseArrClient::new(MediaKind::Tv, "v3", config, timeout))
    }
}

#[async_trait::async_trait]
impl ArrClient for SonarrClient {
    fn kind(&self) -> MediaKind {
        MediaKind::Tv
    }

    fn quality_profile_id(&self) -> u32 {
        self.0.quality_profile_id
    }

    async fn test_connection(&self) -> Result<bool> {
        self.0.test_connection().await
    }

    async fn lookup(&self, term: &str) -> Result<Vec<LookupItem>> {
        self.0.lookup("/series/lookup", term).await
    }

    async fn list_root_folders(&self) -> Result<Vec<RootFolder>> {
        self.0.list_root_folders().await
    }

    async fn add_item(&self, payload: &AddPayload) -> Result<AddOutcome> {
        self.0.post_add("/series", payload).await
    }
}

pub struct RadarrClient(BaseArrClient);

impl RadarrClient {
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Self {
        Self(BaseArrClient::new(MediaKind::Movie, "v3", config, timeout))
    }
}

#[async_trait::async_trait]
impl ArrClient for RadarrClient {
    fn kind(&self) -> MediaKind {
        MediaKind::Movie
    }

    fn quality_profile_id(&self) -> u32 {
        self.0.quality_profile_id
    }

    async fn test_connection(&self) -> Result<bool> {
        self.0.test_connection().await
    }

    async fn lookup(&self, term: &str) -> Result<Vec<LookupItem>> {
        self.0.lookup("/movie/lookup", term).await
    }

    async fn list_root_folders(&self) -> Result<Vec<RootFolder>> {
        self.0.list_root_folders().await
    }

    async fn add_item(&self, payload: &AddPayload) -> Result<AddOutcome> {
        self.0.post_add("/movie", payload).await
    }
}

pub struct LidarrClient(BaseArrClient);

impl LidarrClient {
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Self {
        Self(BaseArrClient::new(MediaKind::Music, "v1", config, timeout))
    }
}

#[async_trait::async_trait]
impl ArrClient for LidarrClient {
    fn kind(&self) -> MediaKind {
        MediaKind::Music
    }

    fn quality_profile_id(&self) -> u32 {
        self.0.quality_profile_id
    }

    async fn test_connection(&self) -> Result<bool> {
        self.0.test_connection().await
    }

    async fn lookup(&self, term: &str) -> Result<Vec<LookupItem>> {
        self.0.lookup("/artist/lookup", term).await
    }

    async fn list_root_folders(&self) -> Result<Vec<RootFolder>> {
        self.0.list_root_folders().await
    }

    async fn add_item(&self, payload: &AddPayload) -> Result<AddOutcome> {
        self.0.post_add("/artist", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arr::{ArtistAddOptions, ArtistPayload};
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(kind: MediaKind, server: &MockServer) -> Box<dyn ArrClient> {
        let config = ProviderConfig::new(format!("{}/", server.uri()), "secret");
        create_client(kind, &config, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_lookup_sends_term_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/series/lookup"))
            .and(query_param("term", "the office"))
            .and(header("X-Api-Key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "The Office (US)", "tvdbId": 73244}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Tv, &server);
        let items = client.lookup("the office").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tvdb_id, Some(73244));
    }

    #[tokio::test]
    async fn test_lidarr_uses_v1_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/artist/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rootfolder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"path": "/music"}])))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Music, &server);
        assert!(client.lookup("radiohead").await.unwrap().is_empty());
        let folders = client.list_root_folders().await.unwrap();
        assert_eq!(folders[0].path.as_deref(), Some("/music"));
    }

    #[tokio::test]
    async fn test_lookup_null_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/movie/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Movie, &server);
        assert!(client.lookup("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_non_success_is_call_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/movie/lookup"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Movie, &server);
        let err = client.lookup("heat").await.unwrap_err();
        assert_matches!(
            err,
            Error::ProviderCallFailed { kind: MediaKind::Movie, status: 401, ref body } if body == "Unauthorized"
        );
    }

    #[tokio::test]
    async fn test_lookup_garbage_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/series/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Tv, &server);
        let err = client.lookup("x").await.unwrap_err();
        assert_matches!(err, Error::ProviderInvalidResponse { kind: MediaKind::Tv, .. });
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let config = ProviderConfig::new("http://127.0.0.1:1", "secret");
        let client = create_client(MediaKind::Tv, &config, Duration::from_millis(500));
        let err = client.lookup("x").await.unwrap_err();
        assert_matches!(err, Error::ProviderUnreachable { kind: MediaKind::Tv, .. });
    }

    #[tokio::test]
    async fn test_add_item_reports_status() {
        let server = MockServer::start().await;
        let payload = AddPayload::Artist(ArtistPayload {
            foreign_artist_id: "mbid".into(),
            artist_name: "Radiohead".into(),
            quality_profile_id: 1,
            root_folder_path: "/music".into(),
            monitored: true,
            add_options: ArtistAddOptions {
                search_for_missing_albums: true,
            },
        });
        Mock::given(method("POST"))
            .and(path("/api/v1/artist"))
            .and(body_json(json!({
                "foreignArtistId": "mbid",
                "artistName": "Radiohead",
                "qualityProfileId": 1,
                "rootFolderPath": "/music",
                "monitored": true,
                "addOptions": {"searchForMissingAlbums": true}
            })))
            .respond_with(ResponseTemplate::new(400).set_body_string("already added"))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Music, &server);
        let outcome = client.add_item(&payload).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.provider_message, "already added");
    }

    #[tokio::test]
    async fn test_add_item_rejects_foreign_payload() {
        let server = MockServer::start().await;
        let payload = AddPayload::Artist(ArtistPayload {
            foreign_artist_id: "mbid".into(),
            artist_name: "Radiohead".into(),
            quality_profile_id: 1,
            root_folder_path: "/music".into(),
            monitored: true,
            add_options: ArtistAddOptions {
                search_for_missing_albums: true,
            },
        });

        let client = client_for(MediaKind::Movie, &server);
        let err = client.add_item(&payload).await.unwrap_err();
        assert_matches!(err, Error::Internal(_));
    }

    #[tokio::test]
    async fn test_connection_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/system/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "4.0"})))
            .mount(&server)
            .await;

        let client = client_for(MediaKind::Movie, &server);
        assert!(client.test_connection().await.unwrap());

        let client = client_for(MediaKind::Music, &server);
        assert!(!client.test_connection().await.unwrap());
    }
}
