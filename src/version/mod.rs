//! Version metadata layer
//!
//! This module provides fetching package version metadata from the registry,
//! mapping it into the canonical shape, and encoding it for the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Types    │────▶│   Encoder   │
//! │   (fetch)   │     │    (map)    │     │  (expose)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │  Encoders   │
//! │   (http)    │                         │(struct,raw) │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Registry trait for fetching version metadata
//! - [`registries`]: Concrete registry implementations
//! - [`types`]: Wire and canonical version metadata types
//! - [`encoder`]: Encoder trait for exposing metadata as an attribute
//! - [`encoders`]: Structured object and raw JSON encoders
//! - [`error`]: Error types for registry, mapping and encoding

pub mod encoder;
pub mod encoders;
pub mod error;
pub mod registries;
pub mod registry;
pub mod types;
