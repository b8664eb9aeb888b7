//! geomux - provider-agnostic geocoding orchestrator
//!
//! This library resolves free-text addresses through several interchangeable
//! geocoding providers. A lookup tries providers least-used first, fails over
//! on any non-success, benches providers that report rate limiting and folds
//! every attempt into one aggregate outcome.
//!
//! # Example
//!
//! ```rust
//! assert_eq!(geomux::key::compose("Paris"), "sirap");
//! ```

pub mod cli;
pub mod config;
pub mod geocode;
pub mod key;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod selector;
pub mod status;
