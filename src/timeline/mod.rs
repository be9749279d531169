//! Frame-accurate sequencing of scenes with transition compensation.

pub mod plan;
