//! Backend access for Cookmate.
//!
//! Implements the `cookmate_core::api` traits over HTTP.

pub mod http_api;

pub use http_api::HttpApiClient;
