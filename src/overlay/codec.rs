use crate::foundation::core::round2;
use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::overlay::object::{OverlayObject, PixelObject, TEXTBOX_TYPE};

/// Canvas dimensions in CSS pixels for one editing or render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions known, finite and strictly positive.
    ///
    /// During initial layout a surface reports zero dimensions; geometry
    /// operations treat that as a transient state and no-op instead of
    /// dividing by zero.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Geometric-mean dimension used for font scaling, rounded to 2dp.
    ///
    /// Font sizes normalize against this rather than width or height alone so
    /// text stays proportionally legible across aspect ratios.
    pub fn diag(self) -> f64 {
        round2((self.width * self.height).sqrt())
    }
}

/// Convert one persisted object to pixel space for `canvas`.
///
/// Requires a usable canvas; rejects unknown object types and malformed font
/// sizes rather than guessing.
pub fn decode_object(obj: &OverlayObject, canvas: CanvasSize) -> SceneloomResult<PixelObject> {
    if !canvas.is_usable() {
        return Err(SceneloomError::validation(
            "canvas dimensions must be known and non-zero",
        ));
    }
    if obj.kind != TEXTBOX_TYPE {
        return Err(SceneloomError::unsupported_object_type(&obj.kind));
    }
    Ok(PixelObject {
        kind: obj.kind.clone(),
        text: obj.text.clone(),
        left: obj.left * canvas.width,
        top: obj.top * canvas.height,
        width: obj.width * canvas.width,
        height: obj.height * canvas.height,
        font_size: obj
            .font_size
            .map(|v| font_size_transform(v, canvas))
            .transpose()?,
        font_family: obj.font_family.clone(),
        font_url: obj.font_url.clone(),
        style: obj.style.clone(),
    })
}

/// Convert one pixel-space object back to normalized form for persistence.
pub fn encode_object(obj: &PixelObject, canvas: CanvasSize) -> SceneloomResult<OverlayObject> {
    if !canvas.is_usable() {
        return Err(SceneloomError::validation(
            "canvas dimensions must be known and non-zero",
        ));
    }
    if obj.kind != TEXTBOX_TYPE {
        return Err(SceneloomError::unsupported_object_type(&obj.kind));
    }
    Ok(OverlayObject {
        kind: obj.kind.clone(),
        text: obj.text.clone(),
        left: obj.left / canvas.width,
        top: obj.top / canvas.height,
        width: obj.width / canvas.width,
        height: obj.height / canvas.height,
        font_size: obj
            .font_size
            .map(|v| font_size_transform(v, canvas))
            .transpose()?,
        font_family: obj.font_family.clone(),
        font_url: obj.font_url.clone(),
        style: obj.style.clone(),
    })
}

/// Decode a persisted object list for `canvas`.
///
/// Returns an empty list when the canvas is not usable yet; callers re-import
/// once layout settles. Unknown object types fail the whole batch.
pub fn decode_objects(
    objects: &[OverlayObject],
    canvas: CanvasSize,
) -> SceneloomResult<Vec<PixelObject>> {
    if !canvas.is_usable() {
        return Ok(Vec::new());
    }
    objects.iter().map(|o| decode_object(o, canvas)).collect()
}

/// Encode pixel-space objects for persistence.
///
/// Returns an empty list when the canvas is not usable yet.
pub fn encode_objects(
    objects: &[PixelObject],
    canvas: CanvasSize,
) -> SceneloomResult<Vec<OverlayObject>> {
    if !canvas.is_usable() {
        return Ok(Vec::new());
    }
    objects.iter().map(|o| encode_object(o, canvas)).collect()
}

/// Rescale placed pixel objects from one canvas size to another in place.
///
/// Resize ticks use the linear dimension ratios directly instead of
/// round-tripping through normalized form, so repeated resizes do not
/// accumulate rounding error. Font size scales with the X ratio. No-ops when
/// either size is unusable.
pub fn rescale_in_place<'a>(
    objects: impl IntoIterator<Item = &'a mut PixelObject>,
    from: CanvasSize,
    to: CanvasSize,
) {
    if !from.is_usable() || !to.is_usable() {
        return;
    }
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    for obj in objects {
        obj.left *= sx;
        obj.width *= sx;
        obj.top *= sy;
        obj.height *= sy;
        if let Some(size) = obj.font_size.as_mut() {
            *size *= sx;
        }
    }
}

// Normalized font values are stored as diag/pixel_size, not pixel_size/diag.
// The same division recovers pixel size, so decode and encode share this
// transform. Persisted scenes already use this convention; do not invert it.
fn font_size_transform(value: f64, canvas: CanvasSize) -> SceneloomResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SceneloomError::validation("fontSize must be finite and > 0"));
    }
    Ok(round2(canvas.diag() / value))
}
