mod types;

pub use types::*;

use anyhow::{Context, Result};
use requestarr_core::MediaKind;
use std::path::Path;

/// Environment variable names for each provider's URL and API key.
pub fn provider_env_vars(kind: MediaKind) -> (&'static str, &'static str) {
    match kind {
        MediaKind::Tv => ("SONARR_URL", "SONARR_API_KEY"),
        MediaKind::Movie => ("RADARR_URL", "RADARR_API_KEY"),
        MediaKind::Music => ("LIDARR_URL", "LIDARR_API_KEY"),
    }
}

/// Load configuration from a TOML file, apply environment overrides, validate
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    tracing::info!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Load config from default locations or fall back to defaults plus environment
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./requestarr.toml",
        "~/.config/requestarr/config.toml",
        "/etc/requestarr/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("No config file found, using defaults and environment");
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Apply overrides from the process environment
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |name| std::env::var(name).ok());
}

/// Apply overrides using an arbitrary variable lookup.
///
/// A provider that only exists in the environment is created on the fly;
/// one that exists in the file has just the given fields replaced.
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(host) = non_empty("REQUESTARR_HOST") {
        config.server.host = host;
    }
    if let Some(port) = non_empty("REQUESTARR_PORT") {
        match port.trim().parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid REQUESTARR_PORT: {}", port),
        }
    }

    for kind in MediaKind::ALL {
        let (url_var, key_var) = provider_env_vars(kind);
        let url = non_empty(url_var);
        let api_key = non_empty(key_var);

        if url.is_none() && api_key.is_none() {
            continue;
        }

        let slot = config.providers.slot_mut(kind);
        let provider = slot.get_or_insert_with(|| ProviderConfig::new("", ""));
        if let Some(url) = url {
            provider.url = url;
        }
        if let Some(api_key) = api_key {
            provider.api_key = api_key;
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.server.request_timeout_secs == 0 {
        anyhow::bail!("request_timeout_secs must be greater than 0");
    }

    if config.server.results_per_page == 0 {
        anyhow::bail!("results_per_page must be greater than 0");
    }

    if let Some(ref dir) = config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    for (kind, provider) in config.providers.iter() {
        if !provider.enabled {
            continue;
        }

        let name = kind.provider_name();
        if provider.api_key.trim().is_empty() {
            anyhow::bail!("{} is enabled but has no API key", name);
        }

        let url = reqwest::Url::parse(&provider.url)
            .with_context(|| format!("{} has an invalid URL: {:?}", name, provider.url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("{} URL must be http or https: {}", name, provider.url);
        }
    }

    Ok(())
}
