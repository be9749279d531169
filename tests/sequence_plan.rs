use sceneloom::{
    FrameIndex, MIN_SCENE_FRAMES, Storyboard, TRANSITION_FRAMES, compute_total_frames,
};

fn fixture() -> Storyboard {
    let sb = Storyboard::from_json(include_str!("data/storyboard.json")).unwrap();
    sb.validate().unwrap();
    sb
}

#[test]
fn plan_places_fixture_scenes_head_to_tail() {
    let sb = fixture();
    let plan = sb.plan().unwrap();

    // 2.0s + 0.75s + 5.0s at 30 fps.
    assert_eq!(plan.total_frames, 233);
    assert_eq!(plan.slots.len(), 3);

    let hook = plan.slot_for("hook").unwrap();
    assert_eq!(hook.start_frame, FrameIndex(0));
    assert_eq!(hook.visible_frames, 60);
    assert_eq!(hook.overlay_frames, 60 - TRANSITION_FRAMES);
    assert_eq!(hook.overlay_hold_frames, TRANSITION_FRAMES);
    assert_eq!(hook.media_frames, 60 + TRANSITION_FRAMES);
    assert_eq!(hook.transition_out_frames, TRANSITION_FRAMES);

    // 0.75s rounds to 23 frames, at or below the minimum: the overlay keeps
    // its full slot even though a transition follows.
    let flash = plan.slot_for("flash").unwrap();
    assert_eq!(flash.start_frame, FrameIndex(60));
    assert_eq!(flash.visible_frames, 23);
    assert!(flash.visible_frames <= MIN_SCENE_FRAMES);
    assert_eq!(flash.overlay_frames, 23);
    assert_eq!(flash.overlay_hold_frames, 0);
    assert_eq!(flash.media_frames, 33);

    // Last scene has no outgoing transition.
    let outro = plan.slot_for("outro").unwrap();
    assert_eq!(outro.start_frame, FrameIndex(83));
    assert_eq!(outro.visible_frames, 150);
    assert_eq!(outro.overlay_frames, 150);
    assert_eq!(outro.media_frames, 150);
    assert_eq!(outro.transition_out_frames, 0);
}

#[test]
fn slots_tile_the_timeline_and_media_overlaps_the_successor() {
    let sb = fixture();
    let plan = sb.plan().unwrap();

    // Slot starts advance by visible frames: transitions never add runtime.
    let visible_sum: u64 = plan.slots.iter().map(|s| s.visible_frames).sum();
    assert_eq!(visible_sum, plan.total_frames);
    for pair in plan.slots.windows(2) {
        assert_eq!(
            pair[0].start_frame.0 + pair[0].visible_frames,
            pair[1].start_frame.0
        );
        // The outgoing media carries the cross-fade into the successor.
        assert_eq!(
            pair[0].media_range().end.0,
            pair[1].start_frame.0 + pair[0].transition_out_frames
        );
    }

    assert_eq!(plan.slot_at(FrameIndex(82)).unwrap().scene_id, "flash");
    assert_eq!(plan.slot_at(FrameIndex(83)).unwrap().scene_id, "outro");
    assert_eq!(plan.slot_at(FrameIndex(232)).unwrap().scene_id, "outro");
    assert!(plan.slot_at(FrameIndex(233)).is_none());
}

#[test]
fn total_frames_matches_the_standalone_computation() {
    let sb = fixture();
    let plan = sb.plan().unwrap();
    assert_eq!(
        compute_total_frames(sb.ordered_scenes(), plan.fps),
        plan.total_frames
    );
}

#[test]
fn plan_serializes_for_diagnostics() {
    let sb = fixture();
    let plan = sb.plan().unwrap();
    let v = serde_json::to_value(&plan).unwrap();

    assert_eq!(v["total_frames"], 233);
    assert_eq!(v["fps"]["num"], 30);
    assert_eq!(v["transition_frames"], 10);
    assert_eq!(v["slots"][0]["scene_id"], "hook");
    assert_eq!(v["slots"][2]["start_frame"], 83);
}
