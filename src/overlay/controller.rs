use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::fonts::registry::DEFAULT_FONT_FAMILY;
use crate::fonts::resolver::{FontLoader, FontResolver};
use crate::foundation::clock::{Clock, SystemClock};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::overlay::codec::{self, CanvasSize};
use crate::overlay::events::{EventBus, OverlayEvent, SubscriptionId};
use crate::overlay::object::{ObjectId, OverlayObject, PixelObject, TEXTBOX_TYPE};
use crate::overlay::surface::Surface;
use crate::persist::debounce::SAVE_DEBOUNCE;

/// Window after binding during which `ObjectAdded` events are swallowed, so
/// the initial `import_objects` never looks like a user edit.
pub const IMPORT_GRACE: Duration = Duration::from_millis(500);

/// Pixel font size applied to new text when the caller does not pick one.
pub const DEFAULT_FONT_SIZE_PX: f64 = 40.0;

/// Knobs for one editing session.
#[derive(Clone, Debug)]
pub struct EditorOptions {
    /// See [`IMPORT_GRACE`].
    pub import_grace: Duration,
    /// See [`DEFAULT_FONT_SIZE_PX`].
    pub default_font_size_px: f64,
    /// Edit-settle delay before a save is issued.
    pub save_debounce: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            import_grace: IMPORT_GRACE,
            default_font_size_px: DEFAULT_FONT_SIZE_PX,
            save_debounce: SAVE_DEBOUNCE,
        }
    }
}

/// Initial styling for [`OverlayController::add_text`].
#[derive(Clone, Debug, Default)]
pub struct TextStyle {
    /// Family to render with; the default family when absent.
    pub font_family: Option<String>,
    /// Pixel size; [`EditorOptions::default_font_size_px`] when absent.
    pub font_size_px: Option<f64>,
    /// Opaque style fields (fill, alignment, opacity, ...).
    pub style: BTreeMap<String, serde_json::Value>,
}

// Wire fields owned by the object struct itself. Style commands must not
// shadow these through the flattened style map.
const RESERVED_STYLE_KEYS: [&str; 9] = [
    "type",
    "text",
    "left",
    "top",
    "width",
    "height",
    "fontSize",
    "fontFamily",
    "fontUrl",
];

enum BindState {
    Unbound,
    Bound { surface: Surface, since: Instant },
    Disposed,
}

/// Command-based editor over one rendering surface.
///
/// Lifecycle is one-directional: `Unbound` -> `Bound` -> `Disposed`. A
/// controller is never rebound to a second surface; editors create a fresh
/// controller per mount.
///
/// All mutation goes through commands, and every content change is announced
/// on the event bus. The exception is the import grace window: `ObjectAdded`
/// events fired while the initial load settles are swallowed so persistence
/// consumers only ever see user-driven changes.
pub struct OverlayController {
    state: BindState,
    bus: EventBus,
    resolver: FontResolver,
    opts: EditorOptions,
    clock: Rc<dyn Clock>,
}

impl OverlayController {
    pub fn new(resolver: FontResolver, opts: EditorOptions) -> Self {
        Self::with_clock(resolver, opts, Rc::new(SystemClock))
    }

    /// Construct with an injected clock. Tests drive the grace window with a
    /// [`crate::ManualClock`].
    pub fn with_clock(resolver: FontResolver, opts: EditorOptions, clock: Rc<dyn Clock>) -> Self {
        Self {
            state: BindState::Unbound,
            bus: EventBus::new(),
            resolver,
            opts,
            clock,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.opts
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&OverlayEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Attach the surface this controller will own. Starts the import grace
    /// window.
    pub fn bind(&mut self, surface: Surface) -> SceneloomResult<()> {
        match self.state {
            BindState::Unbound => {
                self.state = BindState::Bound {
                    surface,
                    since: self.clock.now(),
                };
                Ok(())
            }
            BindState::Bound { .. } => Err(SceneloomError::session(
                "controller is already bound to a surface",
            )),
            BindState::Disposed => Err(SceneloomError::session(
                "controller was disposed and cannot be rebound",
            )),
        }
    }

    /// Tear down: drop the surface and every listener. Idempotent.
    pub fn dispose(&mut self) {
        self.state = BindState::Disposed;
        self.bus.clear();
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound { .. })
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.state, BindState::Disposed)
    }

    /// Read access to the bound surface, if any.
    pub fn surface(&self) -> Option<&Surface> {
        match &self.state {
            BindState::Bound { surface, .. } => Some(surface),
            _ => None,
        }
    }

    /// Currently selected object, if any.
    pub fn selected_object(&self) -> Option<(ObjectId, &PixelObject)> {
        let surface = self.surface()?;
        let id = surface.selected()?;
        Some((id, surface.get(id)?))
    }

    /// Decode persisted objects onto the surface.
    ///
    /// Fonts are resolved and loaded first so text metrics are ready by the
    /// time geometry lands. With `replace` the surface is cleared first
    /// (replace-on-load semantics). No-ops while the canvas has no usable
    /// dimensions; callers re-import once layout settles.
    #[tracing::instrument(skip(self, objects, loader), fields(count = objects.len()))]
    pub fn import_objects(
        &mut self,
        objects: &[OverlayObject],
        replace: bool,
        loader: &dyn FontLoader,
    ) -> SceneloomResult<usize> {
        let canvas = self.bound()?.canvas();
        if !canvas.is_usable() {
            tracing::debug!("canvas dimensions not ready; skipping import");
            return Ok(0);
        }

        let requests = self.resolver.resolve(objects);
        self.resolver.ensure_loaded(&requests, loader);

        let decoded = codec::decode_objects(objects, canvas)?;

        if replace {
            let surface = self.bound_mut()?;
            let had_selection = surface.selected().is_some();
            surface.clear();
            if had_selection {
                self.emit(OverlayEvent::SelectionChanged { selected: None });
            }
        }

        let mut inserted = 0;
        for obj in decoded {
            let id = self.bound_mut()?.insert(obj);
            self.emit(OverlayEvent::ObjectAdded { id });
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Place a new text box and select it.
    pub fn add_text(&mut self, text: &str, style: TextStyle) -> SceneloomResult<ObjectId> {
        let canvas = self.bound()?.canvas();
        if !canvas.is_usable() {
            return Err(SceneloomError::validation(
                "canvas dimensions must be known before adding text",
            ));
        }
        if let Some(size) = style.font_size_px
            && (!size.is_finite() || size <= 0.0)
        {
            return Err(SceneloomError::validation("fontSize must be finite and > 0"));
        }

        let family = style
            .font_family
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
        let font_url = self.resolver.request_for(&family, None).url;
        let font_size = style.font_size_px.unwrap_or(self.opts.default_font_size_px);

        let obj = PixelObject {
            kind: TEXTBOX_TYPE.to_string(),
            text: text.to_string(),
            left: canvas.width * 0.1,
            top: canvas.height * 0.4,
            width: canvas.width * 0.8,
            height: font_size * 1.5,
            font_size: Some(font_size),
            font_family: family,
            font_url,
            style: style.style,
        };

        let id = self.bound_mut()?.insert(obj);
        self.emit(OverlayEvent::ObjectAdded { id });
        if self.bound_mut()?.select(Some(id)) {
            self.emit(OverlayEvent::SelectionChanged { selected: Some(id) });
        }
        Ok(id)
    }

    /// Remove the selected object. Returns `false` when nothing is selected.
    pub fn remove_selected(&mut self) -> SceneloomResult<bool> {
        let Some(id) = self.bound()?.selected() else {
            return Ok(false);
        };
        self.bound_mut()?.remove(id);
        self.emit(OverlayEvent::ObjectRemoved { id });
        self.emit(OverlayEvent::SelectionChanged { selected: None });
        Ok(true)
    }

    /// Programmatic selection. Returns `true` when the selection changed.
    pub fn select(&mut self, id: Option<ObjectId>) -> SceneloomResult<bool> {
        let changed = self.bound_mut()?.select(id);
        if changed {
            let selected = self.bound()?.selected();
            self.emit(OverlayEvent::SelectionChanged { selected });
        }
        Ok(changed)
    }

    /// Route a pointer-down at canvas coordinates.
    ///
    /// A hit selects the topmost object and announces `ObjectClicked`; a miss
    /// clears the selection and announces `CanvasClicked`.
    pub fn pointer_down(&mut self, point: Point) -> SceneloomResult<Option<ObjectId>> {
        let hit = self.bound()?.hit_test(point);
        if self.bound_mut()?.select(hit) {
            self.emit(OverlayEvent::SelectionChanged { selected: hit });
        }
        match hit {
            Some(id) => self.emit(OverlayEvent::ObjectClicked { id }),
            None => self.emit(OverlayEvent::CanvasClicked),
        }
        Ok(hit)
    }

    /// Replace the selected object's text.
    pub fn set_text(&mut self, text: &str) -> SceneloomResult<bool> {
        let Some((id, _)) = self.with_selected(|obj| obj.text = text.to_string())? else {
            return Ok(false);
        };
        self.emit(OverlayEvent::TextChanged { id });
        Ok(true)
    }

    /// Set the selected object's pixel font size.
    pub fn set_font_size(&mut self, size_px: f64) -> SceneloomResult<bool> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneloomError::validation("fontSize must be finite and > 0"));
        }
        let Some((id, _)) = self.with_selected(|obj| obj.font_size = Some(size_px))? else {
            return Ok(false);
        };
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Switch the selected object to another family, loading its asset.
    ///
    /// The resolved asset URL replaces any previous `fontUrl` so other
    /// clients render with the same asset.
    pub fn set_font_family(
        &mut self,
        family: &str,
        loader: &dyn FontLoader,
    ) -> SceneloomResult<bool> {
        if family.trim().is_empty() {
            return Err(SceneloomError::validation("fontFamily must be non-empty"));
        }
        let Some(id) = self.bound()?.selected() else {
            return Ok(false);
        };

        let request = self.resolver.request_for(family, None);
        self.resolver
            .ensure_loaded(std::slice::from_ref(&request), loader);

        let surface = self.bound_mut()?;
        let Some(obj) = surface.get_mut(id) else {
            return Ok(false);
        };
        obj.font_family = family.to_string();
        obj.font_url = request.url;
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Set the selected object's fill color.
    pub fn set_fill(&mut self, color: &str) -> SceneloomResult<bool> {
        self.set_property("fill", serde_json::Value::String(color.to_string()))
    }

    /// Set the selected object's text alignment.
    pub fn set_text_align(&mut self, align: &str) -> SceneloomResult<bool> {
        self.set_property("textAlign", serde_json::Value::String(align.to_string()))
    }

    /// Set one opaque style field on the selected object.
    pub fn set_property(&mut self, key: &str, value: serde_json::Value) -> SceneloomResult<bool> {
        if RESERVED_STYLE_KEYS.contains(&key) {
            return Err(SceneloomError::validation(format!(
                "style key '{key}' shadows a structural field"
            )));
        }
        let Some((id, _)) = self.with_selected(|obj| {
            obj.style.insert(key.to_string(), value);
        })?
        else {
            return Ok(false);
        };
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Flip the selected object between bold and normal weight.
    pub fn toggle_bold(&mut self) -> SceneloomResult<bool> {
        let Some((id, _)) = self.with_selected(|obj| {
            let bold = obj.style.get("fontWeight").and_then(|v| v.as_str()) == Some("bold");
            let next = if bold { "normal" } else { "bold" };
            obj.style
                .insert("fontWeight".to_string(), serde_json::json!(next));
        })?
        else {
            return Ok(false);
        };
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Flip the selected object between italic and normal style.
    pub fn toggle_italic(&mut self) -> SceneloomResult<bool> {
        let Some((id, _)) = self.with_selected(|obj| {
            let italic = obj.style.get("fontStyle").and_then(|v| v.as_str()) == Some("italic");
            let next = if italic { "normal" } else { "italic" };
            obj.style
                .insert("fontStyle".to_string(), serde_json::json!(next));
        })?
        else {
            return Ok(false);
        };
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Flip the selected object's text between upper and lower case.
    pub fn toggle_uppercase(&mut self) -> SceneloomResult<bool> {
        let Some((id, _)) = self.with_selected(|obj| {
            let upper = !obj.text.is_empty() && obj.text == obj.text.to_uppercase();
            obj.text = if upper {
                obj.text.to_lowercase()
            } else {
                obj.text.to_uppercase()
            };
        })?
        else {
            return Ok(false);
        };
        self.emit(OverlayEvent::TextChanged { id });
        Ok(true)
    }

    /// Move/resize the selected object (drag handles).
    pub fn set_selected_bounds(&mut self, bounds: Rect) -> SceneloomResult<bool> {
        if ![bounds.x0, bounds.y0, bounds.x1, bounds.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(SceneloomError::validation("bounds must be finite"));
        }
        let Some((id, _)) = self.with_selected(|obj| {
            obj.left = bounds.x0;
            obj.top = bounds.y0;
            obj.width = bounds.width();
            obj.height = bounds.height();
        })?
        else {
            return Ok(false);
        };
        self.emit(OverlayEvent::ObjectModified { id });
        Ok(true)
    }

    /// Apply a canvas resize tick.
    ///
    /// Placed objects are rescaled in place by the dimension ratios; only the
    /// latest size matters, so each call fully supersedes the previous
    /// geometry. Not a content change: normalized exports are identical
    /// before and after, so no events fire.
    pub fn resize_canvas(&mut self, new_size: CanvasSize) -> SceneloomResult<()> {
        if !new_size.is_usable() {
            return Ok(());
        }
        let surface = self.bound_mut()?;
        let old = surface.canvas();
        if old == new_size {
            return Ok(());
        }
        codec::rescale_in_place(surface.iter_mut().map(|(_, obj)| obj), old, new_size);
        surface.set_canvas(new_size);
        Ok(())
    }

    /// Encode the surface's objects back to normalized form for persistence.
    pub fn export_objects(&self) -> SceneloomResult<Vec<OverlayObject>> {
        let surface = self.bound()?;
        codec::encode_objects(&surface.pixel_objects(), surface.canvas())
    }

    fn bound(&self) -> SceneloomResult<&Surface> {
        match &self.state {
            BindState::Bound { surface, .. } => Ok(surface),
            BindState::Unbound => Err(SceneloomError::session(
                "controller is not bound to a surface",
            )),
            BindState::Disposed => Err(SceneloomError::session("controller was disposed")),
        }
    }

    fn bound_mut(&mut self) -> SceneloomResult<&mut Surface> {
        match &mut self.state {
            BindState::Bound { surface, .. } => Ok(surface),
            BindState::Unbound => Err(SceneloomError::session(
                "controller is not bound to a surface",
            )),
            BindState::Disposed => Err(SceneloomError::session("controller was disposed")),
        }
    }

    fn with_selected<R>(
        &mut self,
        f: impl FnOnce(&mut PixelObject) -> R,
    ) -> SceneloomResult<Option<(ObjectId, R)>> {
        let Some(id) = self.bound()?.selected() else {
            return Ok(None);
        };
        let surface = self.bound_mut()?;
        let Some(obj) = surface.get_mut(id) else {
            return Ok(None);
        };
        Ok(Some((id, f(obj))))
    }

    fn emit(&mut self, event: OverlayEvent) {
        if matches!(event, OverlayEvent::ObjectAdded { .. }) && self.in_import_grace() {
            return;
        }
        self.bus.emit(&event);
    }

    fn in_import_grace(&self) -> bool {
        match &self.state {
            BindState::Bound { since, .. } => {
                self.clock.now().duration_since(*since) < self.opts.import_grace
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::registry::FontRegistry;
    use crate::fonts::resolver::MemoryFontLoader;
    use crate::foundation::clock::ManualClock;
    use std::cell::RefCell;

    fn controller(clock: &ManualClock) -> OverlayController {
        OverlayController::with_clock(
            FontResolver::new(FontRegistry::builtin()),
            EditorOptions::default(),
            Rc::new(clock.clone()),
        )
    }

    fn bound_controller(clock: &ManualClock) -> OverlayController {
        let mut ctl = controller(clock);
        ctl.bind(Surface::new(CanvasSize::new(1280.0, 720.0))).unwrap();
        ctl
    }

    fn sample_objects() -> Vec<OverlayObject> {
        let mut a = OverlayObject::text_box("first");
        a.left = 0.1;
        a.top = 0.1;
        a.width = 0.3;
        a.height = 0.1;
        a.font_size = Some(24.0);
        let mut b = OverlayObject::text_box("second");
        b.left = 0.5;
        b.top = 0.5;
        b.width = 0.3;
        b.height = 0.1;
        vec![a, b]
    }

    fn record_events(ctl: &mut OverlayController) -> Rc<RefCell<Vec<OverlayEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctl.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
        seen
    }

    #[test]
    fn binding_is_one_directional() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        assert!(ctl.import_objects(&[], true, &MemoryFontLoader::default()).is_err());

        ctl.bind(Surface::new(CanvasSize::new(100.0, 100.0))).unwrap();
        assert!(ctl.bind(Surface::new(CanvasSize::new(100.0, 100.0))).is_err());

        ctl.dispose();
        assert!(ctl.is_disposed());
        assert!(ctl.bind(Surface::new(CanvasSize::new(100.0, 100.0))).is_err());
        assert!(ctl.export_objects().is_err());
    }

    #[test]
    fn import_swallows_added_events_during_grace() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let seen = record_events(&mut ctl);

        let n = ctl
            .import_objects(&sample_objects(), true, &MemoryFontLoader::default())
            .unwrap();
        assert_eq!(n, 2);
        assert!(seen.borrow().is_empty());

        clock.advance(IMPORT_GRACE + Duration::from_millis(1));
        let id = ctl.add_text("user text", TextStyle::default()).unwrap();
        let events = seen.borrow();
        assert!(events.contains(&OverlayEvent::ObjectAdded { id }));
        assert!(events.contains(&OverlayEvent::SelectionChanged { selected: Some(id) }));
    }

    #[test]
    fn import_after_grace_emits_added_events() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let seen = record_events(&mut ctl);

        clock.advance(Duration::from_secs(2));
        ctl.import_objects(&sample_objects(), true, &MemoryFontLoader::default())
            .unwrap();
        let added = seen
            .borrow()
            .iter()
            .filter(|ev| matches!(ev, OverlayEvent::ObjectAdded { .. }))
            .count();
        assert_eq!(added, 2);
    }

    #[test]
    fn import_replaces_existing_objects() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let loader = MemoryFontLoader::default();

        ctl.import_objects(&sample_objects(), true, &loader).unwrap();
        assert_eq!(ctl.surface().unwrap().len(), 2);

        ctl.import_objects(&sample_objects()[..1], true, &loader).unwrap();
        assert_eq!(ctl.surface().unwrap().len(), 1);

        ctl.import_objects(&sample_objects(), false, &loader).unwrap();
        assert_eq!(ctl.surface().unwrap().len(), 3);
    }

    #[test]
    fn import_propagates_unsupported_types() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let mut objects = sample_objects();
        objects[1].kind = "Ellipse".to_string();

        let err = ctl
            .import_objects(&objects, true, &MemoryFontLoader::default())
            .unwrap_err();
        assert!(matches!(err, SceneloomError::UnsupportedObjectType(_)));
    }

    #[test]
    fn import_noops_until_canvas_is_usable() {
        let clock = ManualClock::new();
        let mut ctl = controller(&clock);
        ctl.bind(Surface::new(CanvasSize::new(0.0, 0.0))).unwrap();
        let loader = MemoryFontLoader::default();

        let n = ctl.import_objects(&sample_objects(), true, &loader).unwrap();
        assert_eq!(n, 0);
        assert!(ctl.surface().unwrap().is_empty());

        ctl.resize_canvas(CanvasSize::new(1280.0, 720.0)).unwrap();
        let n = ctl.import_objects(&sample_objects(), true, &loader).unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn pointer_routing_distinguishes_object_and_canvas() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        ctl.import_objects(&sample_objects(), true, &MemoryFontLoader::default())
            .unwrap();
        let seen = record_events(&mut ctl);

        // First object covers x in [128, 512), y in [72, 144).
        let hit = ctl.pointer_down(Point::new(200.0, 100.0)).unwrap();
        let id = hit.expect("expected an object under the pointer");
        assert!(seen.borrow().contains(&OverlayEvent::ObjectClicked { id }));
        assert!(
            seen.borrow()
                .contains(&OverlayEvent::SelectionChanged { selected: Some(id) })
        );

        seen.borrow_mut().clear();
        let miss = ctl.pointer_down(Point::new(1270.0, 10.0)).unwrap();
        assert_eq!(miss, None);
        assert!(seen.borrow().contains(&OverlayEvent::CanvasClicked));
        assert!(
            seen.borrow()
                .contains(&OverlayEvent::SelectionChanged { selected: None })
        );
    }

    #[test]
    fn style_commands_require_selection() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        ctl.import_objects(&sample_objects(), true, &MemoryFontLoader::default())
            .unwrap();

        assert!(!ctl.set_text("nobody listens").unwrap());
        assert!(!ctl.toggle_bold().unwrap());
        assert!(!ctl.remove_selected().unwrap());
    }

    #[test]
    fn toggles_flip_on_repeat_invocation() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        clock.advance(Duration::from_secs(1));
        let id = ctl.add_text("Mixed Case", TextStyle::default()).unwrap();
        ctl.select(Some(id)).unwrap();

        ctl.toggle_bold().unwrap();
        assert_eq!(
            ctl.selected_object().unwrap().1.style["fontWeight"],
            serde_json::json!("bold")
        );
        ctl.toggle_bold().unwrap();
        assert_eq!(
            ctl.selected_object().unwrap().1.style["fontWeight"],
            serde_json::json!("normal")
        );

        ctl.toggle_italic().unwrap();
        assert_eq!(
            ctl.selected_object().unwrap().1.style["fontStyle"],
            serde_json::json!("italic")
        );

        ctl.toggle_uppercase().unwrap();
        assert_eq!(ctl.selected_object().unwrap().1.text, "MIXED CASE");
        ctl.toggle_uppercase().unwrap();
        assert_eq!(ctl.selected_object().unwrap().1.text, "mixed case");
    }

    #[test]
    fn set_property_rejects_structural_keys() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let id = ctl.add_text("x", TextStyle::default()).unwrap();
        ctl.select(Some(id)).unwrap();

        assert!(ctl.set_property("left", serde_json::json!(0.5)).is_err());
        assert!(ctl.set_property("fontSize", serde_json::json!(12)).is_err());
        assert!(ctl.set_property("opacity", serde_json::json!(0.8)).unwrap());
    }

    #[test]
    fn remove_selected_emits_removal_and_selection() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        clock.advance(Duration::from_secs(1));
        let id = ctl.add_text("bye", TextStyle::default()).unwrap();
        let seen = record_events(&mut ctl);

        assert!(ctl.remove_selected().unwrap());
        assert!(seen.borrow().contains(&OverlayEvent::ObjectRemoved { id }));
        assert!(
            seen.borrow()
                .contains(&OverlayEvent::SelectionChanged { selected: None })
        );
        assert!(ctl.surface().unwrap().is_empty());
    }

    #[test]
    fn export_round_trips_imported_objects() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let objects = sample_objects();
        ctl.import_objects(&objects, true, &MemoryFontLoader::default())
            .unwrap();

        let exported = ctl.export_objects().unwrap();
        assert_eq!(exported.len(), objects.len());
        for (exp, orig) in exported.iter().zip(&objects) {
            assert_eq!(exp.text, orig.text);
            assert!((exp.left - orig.left).abs() <= 0.01);
            assert!((exp.top - orig.top).abs() <= 0.01);
            assert!((exp.width - orig.width).abs() <= 0.01);
            assert!((exp.height - orig.height).abs() <= 0.01);
        }
    }

    #[test]
    fn resize_preserves_normalized_export() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        ctl.import_objects(&sample_objects(), true, &MemoryFontLoader::default())
            .unwrap();
        let before = ctl.export_objects().unwrap();

        ctl.resize_canvas(CanvasSize::new(1920.0, 1080.0)).unwrap();
        let after = ctl.export_objects().unwrap();

        for (a, b) in before.iter().zip(&after) {
            assert!((a.left - b.left).abs() <= 0.01);
            assert!((a.top - b.top).abs() <= 0.01);
            assert!((a.width - b.width).abs() <= 0.01);
            assert!((a.height - b.height).abs() <= 0.01);
            match (a.font_size, b.font_size) {
                (Some(x), Some(y)) => assert!((x - y).abs() <= 0.01),
                (x, y) => assert_eq!(x, y),
            }
        }
    }

    #[test]
    fn drag_updates_selected_bounds() {
        let clock = ManualClock::new();
        let mut ctl = bound_controller(&clock);
        let id = ctl.add_text("drag me", TextStyle::default()).unwrap();
        ctl.select(Some(id)).unwrap();

        ctl.set_selected_bounds(Rect::new(10.0, 20.0, 110.0, 70.0))
            .unwrap();
        let (_, obj) = ctl.selected_object().unwrap();
        assert_eq!(obj.left, 10.0);
        assert_eq!(obj.top, 20.0);
        assert_eq!(obj.width, 100.0);
        assert_eq!(obj.height, 50.0);
    }
}
