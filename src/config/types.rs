use requestarr_core::MediaKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the single-page UI (index.html and assets)
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Timeout applied to every outbound provider call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Page size for search results
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5505
}
fn default_request_timeout() -> u64 {
    5
}
fn default_results_per_page() -> usize {
    crate::normalize::DEFAULT_PER_PAGE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            request_timeout_secs: default_request_timeout(),
            results_per_page: default_results_per_page(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// One optional provider per media kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub tv: Option<ProviderConfig>,

    #[serde(default)]
    pub movie: Option<ProviderConfig>,

    #[serde(default)]
    pub music: Option<ProviderConfig>,
}

impl ProvidersConfig {
    pub fn get(&self, kind: MediaKind) -> Option<&ProviderConfig> {
        match kind {
            MediaKind::Tv => self.tv.as_ref(),
            MediaKind::Movie => self.movie.as_ref(),
            MediaKind::Music => self.music.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: MediaKind) -> &mut Option<ProviderConfig> {
        match kind {
            MediaKind::Tv => &mut self.tv,
            MediaKind::Movie => &mut self.movie,
            MediaKind::Music => &mut self.music,
        }
    }

    /// Configured providers in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MediaKind, &ProviderConfig)> {
        MediaKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|p| (kind, p)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub url: String,

    pub api_key: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Quality profile assigned to newly added items (default: 1)
    #[serde(default = "default_quality_profile")]
    pub quality_profile_id: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_quality_profile() -> u32 {
    1
}

impl ProviderConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            enabled: default_enabled(),
            quality_profile_id: default_quality_profile(),
        }
    }
}
