//! Requestarr - one search-and-request front door for Sonarr, Radarr and Lidarr
//!
//! This library crate exposes the core functionality for integration testing.

pub mod arr;
pub mod config;
pub mod normalize;
pub mod server;
