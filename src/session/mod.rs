//! Editing session: controller, debounce and store wired together.

pub mod editor;
