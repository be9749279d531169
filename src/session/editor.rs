use std::cell::RefCell;
use std::rc::Rc;

use crate::fonts::resolver::{FontLoader, FontResolver};
use crate::foundation::clock::{Clock, SystemClock};
use crate::foundation::error::SceneloomResult;
use crate::overlay::codec::CanvasSize;
use crate::overlay::controller::{EditorOptions, OverlayController};
use crate::overlay::events::SubscriptionId;
use crate::overlay::surface::Surface;
use crate::persist::debounce::SaveDebouncer;
use crate::persist::store::{SceneStore, SceneUpdate};
use crate::scene::model::Scene;

/// What one [`EditorSession::poll`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No save was due.
    Idle,
    /// A save was due but the export matched the last persisted state.
    Skipped,
    Saved,
    /// The store rejected the update; edits stay in memory and the next
    /// edit's debounce cycle retries with the latest state.
    Failed,
}

/// One scene's editing session.
///
/// Owns the overlay controller and wires its content-change events into a
/// debounced save against the scene store. The embedder drives time by
/// calling [`poll`] periodically (or once after the debounce deadline).
///
/// Two guards keep saves honest: the controller's import grace window means
/// loading a scene never counts as an edit, and a deep equality check
/// against the last persisted objects turns no-op edit bursts into skipped
/// writes.
///
/// [`poll`]: EditorSession::poll
pub struct EditorSession {
    controller: OverlayController,
    store: Box<dyn SceneStore>,
    scene: Scene,
    last_saved: Vec<crate::overlay::object::OverlayObject>,
    debouncer: Rc<RefCell<SaveDebouncer>>,
    clock: Rc<dyn Clock>,
    edit_listener: SubscriptionId,
}

impl EditorSession {
    pub fn new(
        scene: &Scene,
        canvas: CanvasSize,
        resolver: FontResolver,
        store: Box<dyn SceneStore>,
    ) -> SceneloomResult<Self> {
        Self::with_clock(
            scene,
            canvas,
            resolver,
            store,
            EditorOptions::default(),
            Rc::new(SystemClock),
        )
    }

    /// Construct with explicit options and clock. Tests drive the grace and
    /// debounce windows with a [`crate::ManualClock`].
    pub fn with_clock(
        scene: &Scene,
        canvas: CanvasSize,
        resolver: FontResolver,
        store: Box<dyn SceneStore>,
        opts: EditorOptions,
        clock: Rc<dyn Clock>,
    ) -> SceneloomResult<Self> {
        scene.validate()?;
        let save_debounce = opts.save_debounce;
        let mut controller = OverlayController::with_clock(resolver, opts, Rc::clone(&clock));
        controller.bind(Surface::new(canvas))?;

        let debouncer = Rc::new(RefCell::new(SaveDebouncer::new(save_debounce)));
        let edit_debouncer = Rc::clone(&debouncer);
        let edit_clock = Rc::clone(&clock);
        let edit_listener = controller.subscribe(move |event| {
            if event.is_content_change() {
                edit_debouncer.borrow_mut().note_edit(edit_clock.now());
            }
        });

        Ok(Self {
            controller,
            store,
            scene: scene.clone(),
            last_saved: scene.objects.clone(),
            debouncer,
            clock,
            edit_listener,
        })
    }

    pub fn scene_id(&self) -> &str {
        &self.scene.id
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OverlayController {
        &mut self.controller
    }

    /// Load the scene's persisted objects onto the surface.
    ///
    /// Runs inside the controller's grace window when called right after
    /// construction, so the load itself never schedules a save.
    pub fn import_initial(&mut self, loader: &dyn FontLoader) -> SceneloomResult<usize> {
        let objects = self.scene.objects.clone();
        self.controller.import_objects(&objects, true, loader)
    }

    pub fn is_save_pending(&self) -> bool {
        self.debouncer.borrow().is_pending()
    }

    /// Run the debounced save if its window elapsed.
    ///
    /// Store failures are reported as [`SaveOutcome::Failed`], not as an
    /// error: the in-memory edit is kept and a later edit retries. An `Err`
    /// here means the export itself failed (unbound or disposed controller).
    pub fn poll(&mut self) -> SceneloomResult<SaveOutcome> {
        let now = self.clock.now();
        if !self.debouncer.borrow_mut().fire_due(now) {
            return Ok(SaveOutcome::Idle);
        }

        let objects = self.controller.export_objects()?;
        if objects == self.last_saved {
            tracing::debug!(scene = %self.scene.id, "objects match last save; skipping write");
            return Ok(SaveOutcome::Skipped);
        }

        let update = SceneUpdate::for_scene(&self.scene, objects.clone());
        match self.store.update_scene(&self.scene.id, update) {
            Ok(()) => {
                tracing::debug!(
                    scene = %self.scene.id,
                    count = objects.len(),
                    "scene objects persisted"
                );
                self.last_saved = objects;
                Ok(SaveOutcome::Saved)
            }
            Err(error) => {
                tracing::warn!(
                    scene = %self.scene.id,
                    %error,
                    "scene update failed; edits retained"
                );
                Ok(SaveOutcome::Failed)
            }
        }
    }

    /// Drop any pending save without persisting.
    pub fn cancel_pending(&self) {
        self.debouncer.borrow_mut().cancel();
    }

    /// Unmount: cancel pending work and tear the controller down.
    pub fn dispose(&mut self) {
        self.cancel_pending();
        self.controller.unsubscribe(self.edit_listener);
        self.controller.dispose();
    }
}
