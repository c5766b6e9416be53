//! # PharmaBrand Client
//!
//! HTTP client for the PharmaBrand backend and its configuration.
//!
//! [`HttpBrandApi`] implements [`pbrand_core::BrandApi`] over `reqwest`.

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpBrandApi;
