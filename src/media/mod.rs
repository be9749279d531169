//! Media byte prefetch ahead of playback.

pub mod prefetch;
