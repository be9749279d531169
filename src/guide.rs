//! # Sceneloom guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of Sceneloom's architecture and public
//! API. It is intentionally detailed so future phases (and external integrations) can build on a
//! shared mental model of what "a scene" means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Storyboard`](crate::Storyboard): the ordered scene list plus optional background music
//! - [`Scene`](crate::Scene): one generated shot (visual file, voiceover, sound effect, overlays)
//! - [`OverlayObject`](crate::OverlayObject): a persisted text overlay in normalized coordinates
//! - [`Surface`](crate::Surface): one editing canvas and its pixel-space objects
//! - [`OverlayController`](crate::OverlayController): command surface for overlay editing
//! - [`EditorSession`](crate::EditorSession): controller + debounced persistence, wired together
//! - [`SequencePlan`](crate::SequencePlan): transition-compensated frame placement of all scenes
//! - [`PlaybackSynchronizer`](crate::PlaybackSynchronizer): multi-track preview playback
//!
//! There are two independent flows over the same scene data:
//!
//! 1. The **edit loop**: import persisted objects, mutate through controller commands, export and
//!    save after edits settle ([`EditorSession::poll`](crate::EditorSession::poll)).
//! 2. The **playback loop**: plan the timeline ([`Storyboard::plan`](crate::Storyboard::plan)),
//!    prefetch media ([`ScenePrefetch::prepare`](crate::ScenePrefetch::prepare)), then drive
//!    tracks with [`PlaybackSynchronizer::tick`](crate::PlaybackSynchronizer::tick).
//!
//! ---
//!
//! ## "No IO in the core" (and why)
//!
//! Sceneloom wants editing, sequencing and synchronization to be deterministic, testable, and
//! portable. To do that, core code never reaches into the network (or filesystem). Instead, IO
//! crosses three narrow collaborator traits:
//!
//! - [`FontLoader`](crate::FontLoader): fetches font bytes for
//!   [`FontResolver`](crate::FontResolver)
//! - [`MediaPrefetcher`](crate::MediaPrefetcher): fetches media bytes ahead of playback
//! - [`SceneStore`](crate::SceneStore): receives debounced
//!   [`SceneUpdate`](crate::SceneUpdate) calls
//!
//! Each trait ships an in-memory implementation ([`MemoryFontLoader`](crate::MemoryFontLoader),
//! [`MemoryPrefetcher`](crate::MemoryPrefetcher), [`MemorySceneStore`](crate::MemorySceneStore))
//! used by the test suite and the demos. Time is injected the same way: anything that measures
//! elapsed time takes a [`Clock`](crate::Clock), and tests substitute a
//! [`ManualClock`](crate::ManualClock) instead of sleeping.
//!
//! ---
//!
//! ## Normalized geometry (Sceneloom's coordinate contract)
//!
//! Persisted overlay objects are resolution independent:
//!
//! - `left`, `top`, `width`, `height` are fractions of the canvas dimensions
//! - `fontSize` is stored as `diag / pixel_size`, where `diag` is the geometric mean of the
//!   canvas dimensions (`sqrt(width * height)`, rounded to two decimals)
//! - absence of `fontSize` means "use the editor default"
//!
//! The codec ([`decode_objects`](crate::decode_objects) /
//! [`encode_objects`](crate::encode_objects)) converts between this wire form and pixel
//! space. Because the font transform is its own
//! inverse, the same formula runs in both directions; persisted scenes already use this
//! convention, so it must not change. Opaque style fields (fill, alignment, anything the editor
//! does not model) pass through decode/encode untouched.
//!
//! If you integrate Sceneloom with an external renderer, this is the most important contract to
//! preserve: export at canvas A, import at canvas B, and the overlay occupies the same fraction
//! of the frame.
//!
//! ---
//!
//! ## Building a storyboard (Rust DSL)
//!
//! JSON is supported via Serde (it is the wire format the scene store speaks), but programmatic
//! construction is easier through the builders.
//!
//! The following example builds a two-scene storyboard and derives its frame placement at the
//! fixed composition rate of 30 fps with 10-frame cross-fades.
//!
//! ```rust,no_run
//! use sceneloom::{OverlayObject, SceneBuilder, StoryboardBuilder};
//!
//! # fn main() -> sceneloom::SceneloomResult<()> {
//! let storyboard = StoryboardBuilder::new()
//!     .scene(
//!         SceneBuilder::new("intro", 3.0)
//!             .image("https://cdn.example.com/intro.png")
//!             .voiceover("https://cdn.example.com/intro.mp3")
//!             .object(OverlayObject::text_box("Welcome"))
//!             .build()?,
//!     )
//!     .scene(
//!         SceneBuilder::new("body", 5.0)
//!             .video("https://cdn.example.com/body.mp4")
//!             .build()?,
//!     )
//!     .music("https://cdn.example.com/theme.mp3")
//!     .build()?;
//!
//! let plan = storyboard.plan()?;
//! assert_eq!(plan.total_frames, 240); // ceil(8s * 30fps)
//!
//! let intro = plan.slot_for("intro").unwrap();
//! assert_eq!(intro.visible_frames, 90);
//! assert_eq!(intro.overlay_frames, 80); // ends 10 frames early for the cross-fade
//! assert_eq!(intro.media_frames, 100); // overlaps 10 frames into "body"
//! # Ok(())
//! # }
//! ```
//!
//! Notes:
//!
//! - [`Storyboard::validate`](crate::Storyboard::validate) is called by the builder.
//! - Scene `order` defaults to insertion order; explicit values win.
//!
//! ---
//!
//! ## Editing: controller, events, grace window
//!
//! [`OverlayController`](crate::OverlayController) owns exactly one [`Surface`](crate::Surface)
//! after [`bind`](crate::OverlayController::bind) and exposes the command set the editing UI
//! calls: [`add_text`](crate::OverlayController::add_text),
//! [`set_text`](crate::OverlayController::set_text),
//! [`set_font_family`](crate::OverlayController::set_font_family),
//! [`toggle_bold`](crate::OverlayController::toggle_bold),
//! [`pointer_down`](crate::OverlayController::pointer_down), and so on. Commands that need a
//! selection return `Ok(false)` when nothing is selected rather than erroring; the UI can call
//! them unconditionally.
//!
//! Mutations emit [`OverlayEvent`](crate::OverlayEvent)s on the controller's bus. Two details
//! matter:
//!
//! - `import_objects` resolves and loads fonts **before** decoding geometry, so text metrics
//!   never come from a half-loaded font. Font load failures degrade to system substitution and
//!   are logged, never fatal.
//! - For [`IMPORT_GRACE`](crate::IMPORT_GRACE) after binding, `ObjectAdded` events are
//!   suppressed. Loading a scene is not an edit; without the grace window the initial import
//!   would look like one.
//!
//! ---
//!
//! ## Persistence: debounce + deep equality
//!
//! [`EditorSession`](crate::EditorSession) subscribes to content-change events and arms a
//! [`SaveDebouncer`](crate::SaveDebouncer) ([`SAVE_DEBOUNCE`](crate::SAVE_DEBOUNCE), 700 ms) on
//! each one. When the embedder's [`poll`](crate::EditorSession::poll) finds the window elapsed,
//! the session exports the surface and compares against the last persisted objects; equal
//! exports skip the write entirely. Store failures are logged and reported as
//! [`SaveOutcome::Failed`](crate::SaveOutcome) while the in-memory edit is retained, so the next
//! edit's cycle retries with the latest state.
//!
//! ---
//!
//! ## Sequencing: transition-compensated frame math
//!
//! [`plan_sequence`](crate::plan_sequence) lays scene slots head to tail so cross-fades never
//! extend total runtime:
//!
//! - a scene's slot is `round(duration * fps)` frames; total runtime is `ceil(sum * fps)`
//! - a non-final scene's **media** track runs [`TRANSITION_FRAMES`](crate::TRANSITION_FRAMES)
//!   past its slot, into the successor, to carry the cross-fade
//! - its **overlay** track ends the same amount early (unless the scene is at or below
//!   [`MIN_SCENE_FRAMES`](crate::MIN_SCENE_FRAMES)), so text never fades into the next scene's
//!   text
//!
//! The plan is derived data: recompute it whenever the scene list changes, never persist it.
//!
//! ---
//!
//! ## Playback: master clock and ended latches
//!
//! A scene previews as up to four tracks ([`TrackKind`](crate::TrackKind)): the visual plus
//! voiceover, sound effect, and storyboard music.
//! [`PlaybackSynchronizer`](crate::PlaybackSynchronizer) commands their
//! [`TrackTransport`](crate::TrackTransport)s in lockstep and treats the scene's
//! authoritative `duration` as the master clock, polled every
//! [`MASTER_TICK`](crate::MASTER_TICK):
//!
//! - a track that ends early latches `ended` and stays paused while the rest continue
//! - pause hits every track regardless of latches; play skips latched tracks
//! - when elapsed play time reaches the scene duration, every track resets to time zero, latches
//!   clear, and the tick reports [`PlaybackStatus::Ended`](crate::PlaybackStatus) (drive
//!   auto-stop or loop-restart from this)
//!
//! Before playback starts, [`ScenePrefetch::prepare`](crate::ScenePrefetch::prepare) requests
//! every asset the scene needs. A track whose fetch fails is treated as absent rather than
//! blocking the scene; dropping the prefetch set (scene switch) releases every held handle.
