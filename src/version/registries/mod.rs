//! Registry implementations for fetching package version metadata

pub mod http;

pub use http::HttpRegistry;
