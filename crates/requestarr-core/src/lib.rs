//! Requestarr-Core: shared types and errors.
//!
//! This crate provides the pieces every other part of requestarr agrees on:
//!
//! - **Media kinds**: [`MediaKind`] selects the downstream provider (Sonarr,
//!   Radarr, Lidarr) and the external identifier scheme it uses
//! - **External IDs**: [`ExternalId`] keeps numeric catalog ids (TVDB, TMDB)
//!   apart from textual ones (MusicBrainz)
//! - **Error handling**: a unified [`Error`] with HTTP status mapping
//!
//! # Examples
//!
//! ```
//! use requestarr_core::{Error, ExternalId, MediaKind, Result};
//!
//! let kind: MediaKind = "tv".parse().unwrap();
//! assert_eq!(kind.provider_name(), "Sonarr");
//!
//! let id = ExternalId::Numeric(81189);
//! assert_eq!(id.to_string(), "81189");
//!
//! fn example() -> Result<()> {
//!     Err(Error::NoRootFolder { kind: MediaKind::Movie })
//! }
//! assert_eq!(example().unwrap_err().http_status(), 500);
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
