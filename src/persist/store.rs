use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::overlay::object::OverlayObject;
use crate::scene::model::Scene;

/// Payload for one scene update call.
///
/// Mirrors what the store accepts: the normalized overlay objects plus the
/// media ids the scene already referenced, passed through unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    pub objects: Vec<OverlayObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effect_id: Option<String>,
}

impl SceneUpdate {
    /// Update carrying `objects`, with media ids copied from the scene.
    pub fn for_scene(scene: &Scene, objects: Vec<OverlayObject>) -> Self {
        Self {
            file_id: scene.file.as_ref().and_then(|f| f.id.clone()),
            objects,
            voiceover_id: scene.voiceover.as_ref().and_then(|a| a.id.clone()),
            sound_effect_id: scene.sound_effect.as_ref().and_then(|a| a.id.clone()),
        }
    }
}

/// Scene store collaborator. Consumed, never implemented here; the store is
/// last-writer-wins with no optimistic concurrency check.
pub trait SceneStore {
    fn update_scene(&mut self, scene_id: &str, update: SceneUpdate) -> SceneloomResult<()>;
}

#[derive(Default)]
struct StoreLog {
    updates: Vec<(String, SceneUpdate)>,
    fail_next: bool,
}

/// In-memory store for tests and demos. Clones share one log, so a test can
/// keep a copy while the session owns the boxed store.
#[derive(Clone, Default)]
pub struct MemorySceneStore {
    log: Rc<RefCell<StoreLog>>,
}

impl MemorySceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `update_scene` call fail once.
    pub fn fail_next(&self) {
        self.log.borrow_mut().fail_next = true;
    }

    pub fn update_count(&self) -> usize {
        self.log.borrow().updates.len()
    }

    pub fn last_update(&self) -> Option<(String, SceneUpdate)> {
        self.log.borrow().updates.last().cloned()
    }
}

impl SceneStore for MemorySceneStore {
    fn update_scene(&mut self, scene_id: &str, update: SceneUpdate) -> SceneloomResult<()> {
        let mut log = self.log.borrow_mut();
        if log.fail_next {
            log.fail_next = false;
            return Err(SceneloomError::persistence(format!(
                "scene update rejected: {scene_id}"
            )));
        }
        log.updates.push((scene_id.to_string(), update));
        Ok(())
    }
}
