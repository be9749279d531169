//! Overlay editing: normalized wire codec, editing surface, event bus, and the
//! controller that ties them together.

pub mod codec;
pub mod controller;
pub mod events;
pub mod object;
pub mod surface;
