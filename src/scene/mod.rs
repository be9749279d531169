//! Scene records: the serde boundary with the scene store, plus builders.

pub mod builder;
pub mod model;
