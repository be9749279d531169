//! Multi-track playback: transport abstraction and the master-clock
//! synchronizer.

pub mod synchronizer;
pub mod transport;
