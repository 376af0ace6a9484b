use super::client::{create_client, ArrClient};
use crate::config::Config;
use requestarr_core::{Error, MediaKind, Result};
use std::collections::HashMap;

/// Clients for every enabled provider, keyed by media kind.
///
/// Built once at startup and shared read-only.
#[derive(Default)]
pub struct ProviderRegistry {
    clients: HashMap<MediaKind, Box<dyn ArrClient>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build clients for the enabled providers in `config`.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.server.request_timeout();
        let mut registry = Self::new();

        for (kind, provider) in config.providers.iter() {
            if !provider.enabled {
                tracing::debug!("{} is disabled, skipping", kind.provider_name());
                continue;
            }
            registry.insert(create_client(kind, provider, timeout));
        }

        registry
    }

    /// Register a client under its own kind, replacing any previous one.
    pub fn insert(&mut self, client: Box<dyn ArrClient>) {
        self.clients.insert(client.kind(), client);
    }

    /// Client for `kind`, or [`Error::ProviderNotConfigured`].
    pub fn get(&self, kind: MediaKind) -> Result<&dyn ArrClient> {
        self.clients
            .get(&kind)
            .map(|c| c.as_ref())
            .ok_or(Error::ProviderNotConfigured(kind))
    }

    pub fn contains(&self, kind: MediaKind) -> bool {
        self.clients.contains_key(&kind)
    }

    /// Configured kinds in display order.
    pub fn kinds(&self) -> Vec<MediaKind> {
        MediaKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }
}
