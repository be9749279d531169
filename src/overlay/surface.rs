use crate::foundation::core::Point;
use crate::overlay::codec::CanvasSize;
use crate::overlay::object::{ObjectId, PixelObject};

/// One editing canvas and the pixel-space objects placed on it.
///
/// A surface is exclusively owned by the controller it is bound to; nothing
/// else mutates its object collection. Ids are surface-local and never reused
/// within one surface's lifetime.
pub struct Surface {
    canvas: CanvasSize,
    objects: Vec<(ObjectId, PixelObject)>,
    selected: Option<ObjectId>,
    next_id: u64,
}

impl Surface {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            objects: Vec::new(),
            selected: None,
            next_id: 0,
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Place an object on top of the stack and return its id.
    pub fn insert(&mut self, object: PixelObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Remove an object. Clears the selection if it pointed at the object.
    pub fn remove(&mut self, id: ObjectId) -> Option<PixelObject> {
        let idx = self.objects.iter().position(|(oid, _)| *oid == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.objects.remove(idx).1)
    }

    /// Remove every object and clear the selection.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
    }

    pub fn get(&self, id: ObjectId) -> Option<&PixelObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PixelObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj)
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Set the selection. Returns `true` when it actually changed.
    ///
    /// Selecting an id not on the surface clears the selection instead.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        let next = id.filter(|id| self.get(*id).is_some());
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// Topmost object under the pointer, if any.
    pub fn hit_test(&self, point: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|(_, obj)| obj.contains(point))
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PixelObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut PixelObject)> {
        self.objects.iter_mut().map(|(id, obj)| (*id, obj))
    }

    /// Snapshot of the placed objects in stacking order.
    pub fn pixel_objects(&self) -> Vec<PixelObject> {
        self.objects.iter().map(|(_, obj)| obj.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::codec::decode_object;
    use crate::overlay::object::OverlayObject;

    fn surface_with_two_boxes() -> (Surface, ObjectId, ObjectId) {
        let canvas = CanvasSize::new(1000.0, 500.0);
        let mut surface = Surface::new(canvas);

        let mut a = OverlayObject::text_box("under");
        a.left = 0.1;
        a.top = 0.1;
        a.width = 0.5;
        a.height = 0.5;
        let mut b = OverlayObject::text_box("over");
        b.left = 0.2;
        b.top = 0.2;
        b.width = 0.5;
        b.height = 0.5;

        let a_id = surface.insert(decode_object(&a, canvas).unwrap());
        let b_id = surface.insert(decode_object(&b, canvas).unwrap());
        (surface, a_id, b_id)
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let (mut surface, a, b) = surface_with_two_boxes();
        assert_ne!(a, b);
        surface.remove(a);
        let c = surface.insert(PixelObject {
            kind: crate::TEXTBOX_TYPE.to_string(),
            text: "new".to_string(),
            left: 0.0,
            top: 0.0,
            width: 10.0,
            height: 10.0,
            font_size: None,
            font_family: crate::DEFAULT_FONT_FAMILY.to_string(),
            font_url: None,
            style: Default::default(),
        });
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn hit_test_returns_topmost() {
        let (surface, a, b) = surface_with_two_boxes();
        // Overlap region: both contain (300, 150); b was inserted later.
        assert_eq!(surface.hit_test(Point::new(300.0, 150.0)), Some(b));
        // Only a covers its top-left corner area.
        assert_eq!(surface.hit_test(Point::new(110.0, 60.0)), Some(a));
        assert_eq!(surface.hit_test(Point::new(990.0, 490.0)), None);
    }

    #[test]
    fn removing_selected_object_clears_selection() {
        let (mut surface, a, _) = surface_with_two_boxes();
        assert!(surface.select(Some(a)));
        surface.remove(a);
        assert_eq!(surface.selected(), None);
    }

    #[test]
    fn selecting_unknown_id_clears_selection() {
        let (mut surface, a, _) = surface_with_two_boxes();
        surface.select(Some(a));
        assert!(surface.select(Some(ObjectId(999))));
        assert_eq!(surface.selected(), None);
    }
}
