//! Sceneloom is the scene composition engine behind an AI video editor.
//!
//! A storyboard is a list of scenes, each carrying generated media (image or
//! video), optional voiceover and sound-effect audio, and text overlays that
//! users edit on an interactive canvas. Sceneloom owns the logic that makes
//! those pieces coherent:
//!
//! 1. **Overlay codec**: overlays persist in resolution-independent normalized
//!    form and are converted to concrete pixel geometry for whatever canvas the
//!    client happens to lay out (`decode_objects` / `encode_objects`).
//! 2. **Overlay controller**: a bound editing surface plus an event bus, with
//!    command-based mutation, selection, and live rescaling on canvas resize.
//! 3. **Sequencing**: scene durations become frame-accurate slots with
//!    cross-fade compensation (`plan_sequence`).
//! 4. **Playback sync**: one master clock drives the visual track and up to
//!    three audio tracks, with per-track ended latches
//!    ([`PlaybackSynchronizer`]).
//! 5. **Persistence**: edits debounce into scene-store updates, skipping
//!    writes that would not change anything ([`EditorSession`]).
//!
//! Rendering and encoding are out of scope: sceneloom prepares geometry,
//! timing, and state for a renderer, it does not rasterize.
//!
//! For a standalone walkthrough of the API, see [`crate::guide`].
#![forbid(unsafe_code)]

mod fonts;
mod foundation;
mod media;
mod overlay;
mod persist;
mod playback;
mod scene;
mod session;
mod timeline;

/// High-level, standalone documentation for sceneloom's concepts.
pub mod guide;

pub use fonts::registry::{DEFAULT_FONT_FAMILY, FontEntry, FontRegistry};
pub use fonts::resolver::{FontLoader, FontRequest, FontResolver, MemoryFontLoader};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Point, Rect, Vec2, round2};
pub use foundation::error::{SceneloomError, SceneloomResult};
pub use media::prefetch::{MediaPrefetcher, MemoryPrefetcher, PrefetchHandle, ScenePrefetch};
pub use overlay::codec::{
    CanvasSize, decode_object, decode_objects, encode_object, encode_objects, rescale_in_place,
};
pub use overlay::controller::{
    DEFAULT_FONT_SIZE_PX, EditorOptions, IMPORT_GRACE, OverlayController, TextStyle,
};
pub use overlay::events::{EventBus, OverlayEvent, SubscriptionId};
pub use overlay::object::{ObjectId, OverlayObject, PixelObject, TEXTBOX_TYPE};
pub use overlay::surface::Surface;
pub use persist::debounce::{SAVE_DEBOUNCE, SaveDebouncer};
pub use persist::store::{MemorySceneStore, SceneStore, SceneUpdate};
pub use playback::synchronizer::{MASTER_TICK, PlaybackStatus, PlaybackSynchronizer, TrackState};
pub use playback::transport::{MemoryTransport, TrackKind, TrackTransport};
pub use scene::builder::{SceneBuilder, StoryboardBuilder};
pub use scene::model::{AudioTrack, MediaFile, MediaKind, Scene, Storyboard};
pub use session::editor::{EditorSession, SaveOutcome};
pub use timeline::plan::{
    COMPOSITION_FPS, MIN_SCENE_FRAMES, SceneSlot, SequencePlan, TRANSITION_FRAMES,
    compute_total_frames, plan_sequence,
};
