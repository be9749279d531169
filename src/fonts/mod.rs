//! Font resolution: registry lookup, asset loading, and readiness tracking.
//!
//! Text-metric-dependent geometry must not run against a fallback font, so
//! the controller resolves and loads fonts before decoding objects.

pub mod registry;
pub mod resolver;
