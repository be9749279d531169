use std::time::Duration;

use sceneloom::{
    CanvasSize, EditorSession, FontRegistry, FontResolver, IMPORT_GRACE, MASTER_TICK,
    MemoryFontLoader, MemorySceneStore, OverlayObject, Point, SaveOutcome, SceneBuilder, TextStyle,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut title = OverlayObject::text_box("This changes everything");
    title.font_size = Some(24.0);
    let scene = SceneBuilder::new("hook", 2.0)
        .image("https://cdn.example.com/hook.png")
        .object(title)
        .build()?;

    let store = MemorySceneStore::new();
    let mut session = EditorSession::new(
        &scene,
        CanvasSize::new(1280.0, 720.0),
        FontResolver::new(FontRegistry::builtin()),
        Box::new(store.clone()),
    )?;

    let loader = MemoryFontLoader::default();
    let imported = session.import_initial(&loader)?;
    println!("imported {imported} objects");

    // Let the grace window lapse so the edits below count as edits.
    std::thread::sleep(IMPORT_GRACE + Duration::from_millis(50));

    let hit = session
        .controller_mut()
        .pointer_down(Point::new(500.0, 300.0))?;
    println!("clicked object: {hit:?}");
    session.controller_mut().set_text("Still changes everything")?;
    session.controller_mut().toggle_bold()?;
    session
        .controller_mut()
        .add_text("tap to read more", TextStyle::default())?;

    // Poll until the debounced save fires.
    for _ in 0..30 {
        std::thread::sleep(MASTER_TICK);
        match session.poll()? {
            SaveOutcome::Idle => continue,
            outcome => {
                println!("save outcome: {outcome:?}");
                break;
            }
        }
    }

    if let Some((scene_id, update)) = store.last_update() {
        println!("persisted scene '{scene_id}':");
        println!("{}", serde_json::to_string_pretty(&update)?);
    }

    session.dispose();
    Ok(())
}
