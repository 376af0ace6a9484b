//! Provider clients for Sonarr, Radarr and Lidarr.

mod client;
mod registry;
mod types;

pub use client::{create_client, ArrClient, LidarrClient, RadarrClient, SonarrClient};
pub use registry::ProviderRegistry;
pub use types::*;
pub(crate) use types::lenient_int;
