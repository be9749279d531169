use sceneloom::{OverlayObject, SceneBuilder, StoryboardBuilder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let storyboard = StoryboardBuilder::new()
        .scene(
            SceneBuilder::new("hook", 2.0)
                .image("https://cdn.example.com/hook.png")
                .voiceover("https://cdn.example.com/hook.mp3")
                .object(OverlayObject::text_box("This changes everything"))
                .build()?,
        )
        .scene(
            SceneBuilder::new("flash", 0.75)
                .video("https://cdn.example.com/flash.mp4")
                .build()?,
        )
        .scene(
            SceneBuilder::new("outro", 5.0)
                .image("https://cdn.example.com/outro.png")
                .object(OverlayObject::text_box("Follow for more"))
                .build()?,
        )
        .music("https://cdn.example.com/theme.mp3")
        .build()?;

    let plan = storyboard.plan()?;
    println!(
        "{} frames total ({:.2}s at {} fps)",
        plan.total_frames,
        plan.duration_secs(),
        plan.fps.as_f64(),
    );
    for slot in &plan.slots {
        println!(
            "  {:<8} frames {:>3}..{:<3}  overlay ends {:>3}  media ends {:>3}",
            slot.scene_id,
            slot.start_frame.0,
            slot.slot_range().end.0,
            slot.overlay_range().end.0,
            slot.media_range().end.0,
        );
    }

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
