use std::collections::BTreeMap;

use crate::fonts::registry::DEFAULT_FONT_FAMILY;
use crate::foundation::core::{Point, Rect};

/// Wire `type` tag of the only overlay object variant currently supported.
pub const TEXTBOX_TYPE: &str = "Textbox";

/// Surface-local handle to one placed overlay object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// A text overlay as persisted: geometry normalized to canvas fractions,
/// font size in canvas-diagonal-relative units.
///
/// Style fields beyond the named ones (fill, alignment, opacity, background)
/// are carried opaquely so other clients' styling survives a round-trip
/// through this editor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Stored as `diag / pixel_size`; absent means "use the default size".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_url: Option<String>,
    #[serde(flatten)]
    pub style: BTreeMap<String, serde_json::Value>,
}

impl OverlayObject {
    /// A text box with default placement and the default family.
    pub fn text_box(text: impl Into<String>) -> Self {
        Self {
            kind: TEXTBOX_TYPE.to_string(),
            text: text.into(),
            left: 0.1,
            top: 0.4,
            width: 0.8,
            height: 0.15,
            font_size: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_url: None,
            style: BTreeMap::new(),
        }
    }
}

/// An overlay object in concrete pixel space for one canvas size.
///
/// Produced by [`crate::decode_objects`]; owned by a [`crate::Surface`] while
/// bound to a controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelObject {
    pub kind: String,
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Pixel font size; absent means "use the default size".
    pub font_size: Option<f64>,
    pub font_family: String,
    pub font_url: Option<String>,
    pub style: BTreeMap<String, serde_json::Value>,
}

impl PixelObject {
    /// Bounding box in canvas pixel coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Hit test against the bounding box.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_uses_camel_case_and_flattened_style() {
        let mut obj = OverlayObject::text_box("hi");
        obj.font_size = Some(24.0);
        obj.style
            .insert("fill".to_string(), serde_json::json!("#ffffff"));
        obj.style
            .insert("textAlign".to_string(), serde_json::json!("center"));

        let v = serde_json::to_value(&obj).unwrap();
        assert_eq!(v["type"], "Textbox");
        assert_eq!(v["fontSize"], 24.0);
        assert_eq!(v["fontFamily"], DEFAULT_FONT_FAMILY);
        assert_eq!(v["fill"], "#ffffff");
        assert_eq!(v["textAlign"], "center");
        assert!(v.get("fontUrl").is_none());
        assert!(v.get("style").is_none());
    }

    #[test]
    fn unknown_wire_fields_land_in_style() {
        let raw = r##"{
            "type": "Textbox",
            "text": "hello",
            "left": 0.25, "top": 0.1, "width": 0.5, "height": 0.2,
            "fontFamily": "Inter",
            "fill": "#222222",
            "opacity": 0.9
        }"##;
        let obj: OverlayObject = serde_json::from_str(raw).unwrap();
        assert_eq!(obj.style.len(), 2);
        assert_eq!(obj.style["opacity"], serde_json::json!(0.9));
        assert!(obj.font_size.is_none());
    }

    #[test]
    fn pixel_bounds_hit_test() {
        let mut px = PixelObject {
            kind: TEXTBOX_TYPE.to_string(),
            text: String::new(),
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 50.0,
            font_size: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_url: None,
            style: BTreeMap::new(),
        };
        assert!(px.contains(Point::new(50.0, 40.0)));
        assert!(!px.contains(Point::new(5.0, 40.0)));
        px.left = 200.0;
        assert!(!px.contains(Point::new(50.0, 40.0)));
    }
}
