use crate::foundation::core::{FrameIndex, FrameRange, Fps};
use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::scene::model::{Scene, Storyboard};

/// Frame rate of composed playback.
pub const COMPOSITION_FPS: Fps = Fps { num: 30, den: 1 };

/// Cross-fade length between adjacent scenes.
pub const TRANSITION_FRAMES: u64 = 10;

/// Scenes at or below this length keep their full overlay duration; shorter
/// overlays would degenerate.
pub const MIN_SCENE_FRAMES: u64 = 30;

/// Derived placement of one scene on the composed timeline.
///
/// Slots are laid head to tail: `start_frame` advances by `visible_frames`
/// per scene, so cross-fades never extend total runtime. The media track of
/// a non-final scene runs `transition_out_frames` past its slot into the
/// successor to carry the cross-fade; the overlay track instead ends early
/// by the same amount (the blank hold), so text never fades into the next
/// scene's text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneSlot {
    pub scene_id: String,
    /// First frame of this scene's slot.
    pub start_frame: FrameIndex,
    /// Nominal slot length: `round(duration * fps)`.
    pub visible_frames: u64,
    /// Frames the overlay track is actually shown.
    pub overlay_frames: u64,
    /// Blank frames after the overlay, covering the outgoing cross-fade.
    pub overlay_hold_frames: u64,
    /// Frames the media track plays, including the overlap into the next
    /// scene's slot.
    pub media_frames: u64,
    /// Cross-fade length into the successor; 0 for the last scene.
    pub transition_out_frames: u64,
}

impl SceneSlot {
    /// Timeline range the media track occupies.
    pub fn media_range(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: FrameIndex(self.start_frame.0 + self.media_frames),
        }
    }

    /// Timeline range the overlay track is visible.
    pub fn overlay_range(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: FrameIndex(self.start_frame.0 + self.overlay_frames),
        }
    }

    /// Timeline range of this scene's nominal slot.
    pub fn slot_range(&self) -> FrameRange {
        FrameRange {
            start: self.start_frame,
            end: FrameIndex(self.start_frame.0 + self.visible_frames),
        }
    }
}

/// Transition-compensated sequencing of a scene list.
///
/// Derived, never persisted; recompute when the scene list or frame rate
/// changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequencePlan {
    pub fps: Fps,
    pub transition_frames: u64,
    /// `ceil(sum(duration) * fps)` over all scenes.
    pub total_frames: u64,
    pub slots: Vec<SceneSlot>,
}

impl SequencePlan {
    pub fn slot_for(&self, scene_id: &str) -> Option<&SceneSlot> {
        self.slots.iter().find(|s| s.scene_id == scene_id)
    }

    /// Slot whose nominal window contains `frame`.
    pub fn slot_at(&self, frame: FrameIndex) -> Option<&SceneSlot> {
        self.slots.iter().find(|s| s.slot_range().contains(frame))
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames)
    }
}

/// Total playback length in frames: `ceil(sum(duration) * fps)`.
pub fn compute_total_frames<'a>(scenes: impl IntoIterator<Item = &'a Scene>, fps: Fps) -> u64 {
    let secs: f64 = scenes.into_iter().map(|s| s.duration).sum();
    (secs * fps.as_f64()).ceil().max(0.0) as u64
}

/// Lay scenes head to tail and compensate for cross-fades.
///
/// For every scene but the last, the overlay track is shortened by
/// `transition_frames` (when the scene is longer than [`MIN_SCENE_FRAMES`])
/// and the media track is extended by the same amount into the successor's
/// slot. A single-scene plan has no transition at all.
#[tracing::instrument(skip(scenes))]
pub fn plan_sequence<'a>(
    scenes: impl IntoIterator<Item = &'a Scene>,
    fps: Fps,
    transition_frames: u64,
) -> SceneloomResult<SequencePlan> {
    let scenes: Vec<&Scene> = scenes.into_iter().collect();
    if fps.num == 0 || fps.den == 0 {
        return Err(SceneloomError::validation("fps must have num>0 and den>0"));
    }
    if transition_frames > MIN_SCENE_FRAMES {
        return Err(SceneloomError::validation(format!(
            "transition_frames must not exceed the minimum scene length ({MIN_SCENE_FRAMES} frames)"
        )));
    }
    for scene in &scenes {
        if !scene.duration.is_finite() || scene.duration <= 0.0 {
            return Err(SceneloomError::validation(format!(
                "scene '{}' duration must be finite and > 0 seconds",
                scene.id
            )));
        }
    }

    let mut slots = Vec::with_capacity(scenes.len());
    let mut start = 0u64;
    for (i, scene) in scenes.iter().enumerate() {
        let visible = fps.secs_to_frames_round(scene.duration);
        let has_next = i + 1 < scenes.len();
        let transition_out = if has_next { transition_frames } else { 0 };
        let overlay = if has_next && visible > MIN_SCENE_FRAMES {
            visible - transition_frames
        } else {
            visible
        };
        slots.push(SceneSlot {
            scene_id: scene.id.clone(),
            start_frame: FrameIndex(start),
            visible_frames: visible,
            overlay_frames: overlay,
            overlay_hold_frames: visible - overlay,
            media_frames: visible + transition_out,
            transition_out_frames: transition_out,
        });
        start += visible;
    }

    Ok(SequencePlan {
        fps,
        transition_frames,
        total_frames: compute_total_frames(scenes.iter().copied(), fps),
        slots,
    })
}

impl Storyboard {
    /// Sequence this storyboard's scenes with the product constants.
    pub fn plan(&self) -> SceneloomResult<SequencePlan> {
        plan_sequence(self.ordered_scenes(), COMPOSITION_FPS, TRANSITION_FRAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::builder::SceneBuilder;

    fn scene(id: &str, secs: f64) -> Scene {
        SceneBuilder::new(id, secs).build().unwrap()
    }

    #[test]
    fn total_frames_is_ceiling_of_summed_seconds() {
        let scenes = [scene("a", 2.0), scene("b", 3.0), scene("c", 5.0)];
        assert_eq!(compute_total_frames(&scenes, COMPOSITION_FPS), 300);

        let scenes = [scene("a", 1.01), scene("b", 1.01)];
        // 2.02s * 30fps = 60.6 -> 61
        assert_eq!(compute_total_frames(&scenes, COMPOSITION_FPS), 61);
    }

    #[test]
    fn overlay_track_is_shortened_by_the_transition() {
        let scenes = [scene("a", 3.0), scene("b", 3.0)];
        let plan = plan_sequence(&scenes, COMPOSITION_FPS, TRANSITION_FRAMES).unwrap();

        let first = &plan.slots[0];
        assert_eq!(first.visible_frames, 90);
        assert_eq!(first.overlay_frames, 80);
        assert_eq!(first.overlay_hold_frames, 10);
        assert_eq!(first.media_frames, 100);
        assert_eq!(first.transition_out_frames, 10);

        // Slots stay head to tail: the cross-fade extends media, not the slot.
        let second = &plan.slots[1];
        assert_eq!(second.start_frame, FrameIndex(90));
        assert_eq!(plan.total_frames, 180);
    }

    #[test]
    fn last_scene_never_contributes_trailing_transition() {
        let scenes = [scene("a", 3.0), scene("b", 3.0)];
        let plan = plan_sequence(&scenes, COMPOSITION_FPS, TRANSITION_FRAMES).unwrap();

        let last = &plan.slots[1];
        assert_eq!(last.transition_out_frames, 0);
        assert_eq!(last.overlay_frames, last.visible_frames);
        assert_eq!(last.media_frames, last.visible_frames);
        assert_eq!(last.media_range().end, FrameIndex(plan.total_frames));
    }

    #[test]
    fn single_scene_has_no_transition() {
        let plan = plan_sequence(&[scene("only", 4.0)], COMPOSITION_FPS, TRANSITION_FRAMES)
            .unwrap();
        assert_eq!(plan.slots.len(), 1);
        assert_eq!(plan.slots[0].overlay_frames, 120);
        assert_eq!(plan.slots[0].media_frames, 120);
        assert_eq!(plan.total_frames, 120);
    }

    #[test]
    fn short_scenes_keep_their_full_overlay() {
        // 1s = 30 frames, not above the 30-frame minimum: no shortening.
        let scenes = [scene("short", 1.0), scene("next", 3.0)];
        let plan = plan_sequence(&scenes, COMPOSITION_FPS, TRANSITION_FRAMES).unwrap();

        let short = &plan.slots[0];
        assert_eq!(short.visible_frames, 30);
        assert_eq!(short.overlay_frames, 30);
        assert_eq!(short.overlay_hold_frames, 0);
        // The media cross-fade still happens.
        assert_eq!(short.media_frames, 40);
    }

    #[test]
    fn media_overlaps_successor_by_transition_frames() {
        let scenes = [scene("a", 2.0), scene("b", 2.0), scene("c", 2.0)];
        let plan = plan_sequence(&scenes, COMPOSITION_FPS, TRANSITION_FRAMES).unwrap();

        for pair in plan.slots.windows(2) {
            let (cur, next) = (&pair[0], &pair[1]);
            assert_eq!(cur.media_range().end.0, next.start_frame.0 + 10);
            assert!(cur.media_range().contains(next.start_frame));
        }
    }

    #[test]
    fn slot_lookup_by_frame_and_id() {
        let scenes = [scene("a", 2.0), scene("b", 3.0)];
        let plan = plan_sequence(&scenes, COMPOSITION_FPS, TRANSITION_FRAMES).unwrap();

        assert_eq!(plan.slot_at(FrameIndex(0)).unwrap().scene_id, "a");
        assert_eq!(plan.slot_at(FrameIndex(59)).unwrap().scene_id, "a");
        assert_eq!(plan.slot_at(FrameIndex(60)).unwrap().scene_id, "b");
        assert!(plan.slot_at(FrameIndex(150)).is_none());
        assert_eq!(plan.slot_for("b").unwrap().start_frame, FrameIndex(60));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(plan_sequence(&[scene("a", 2.0)], Fps { num: 0, den: 1 }, 10).is_err());
        assert!(plan_sequence(&[scene("a", 2.0)], COMPOSITION_FPS, 31).is_err());

        let mut bad = scene("a", 2.0);
        bad.duration = f64::NAN;
        assert!(plan_sequence(&[bad], COMPOSITION_FPS, 10).is_err());
    }

    #[test]
    fn storyboard_plan_uses_scene_order() {
        let sb = crate::scene::builder::StoryboardBuilder::new()
            .scene(scene("late", 2.0))
            .scene(scene("early", 3.0))
            .build()
            .unwrap();
        // Builder assigned orders by insertion; flip them.
        let mut sb = sb;
        sb.scenes[0].order = 1;
        sb.scenes[1].order = 0;

        let plan = sb.plan().unwrap();
        assert_eq!(plan.slots[0].scene_id, "early");
        assert_eq!(plan.slots[1].scene_id, "late");
    }
}
