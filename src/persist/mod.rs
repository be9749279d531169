//! Debounced persistence of overlay edits to the scene store.

pub mod debounce;
pub mod store;
