use std::collections::BTreeSet;

use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::overlay::object::{OverlayObject, TEXTBOX_TYPE};

/// Kind of media referenced by a scene file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// Visual media attached to a scene (generated image or video clip).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaFile {
    /// Store-side file id, passed through on updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: MediaKind,
    pub url: String,
}

/// One audio attachment (voiceover or sound effect).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_volume() -> f64 {
    1.0
}

/// One scene as handed over by the scene store.
///
/// The core treats a scene as immutable except for `objects`, which it
/// rewrites through the persistence collaborator after edits settle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub id: String,
    pub order: u32,
    /// Authoritative duration in seconds.
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<MediaFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<AudioTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effect: Option<AudioTrack>,
    /// Text overlays in normalized form.
    #[serde(default)]
    pub objects: Vec<OverlayObject>,
}

/// Ordered scene list plus optional background music: the playback
/// composition input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_url: Option<String>,
}

impl Scene {
    pub fn validate(&self) -> SceneloomResult<()> {
        if self.id.trim().is_empty() {
            return Err(SceneloomError::validation("scene id must be non-empty"));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SceneloomError::validation(format!(
                "scene '{}' duration must be finite and > 0 seconds",
                self.id
            )));
        }
        if let Some(file) = &self.file
            && file.kind == MediaKind::Audio
        {
            return Err(SceneloomError::validation(format!(
                "scene '{}' visual file must be an image or video",
                self.id
            )));
        }
        for audio in [&self.voiceover, &self.sound_effect].into_iter().flatten() {
            if !audio.volume.is_finite() || audio.volume < 0.0 {
                return Err(SceneloomError::validation(format!(
                    "scene '{}' audio volume must be finite and >= 0",
                    self.id
                )));
            }
        }
        for obj in &self.objects {
            if obj.kind != TEXTBOX_TYPE {
                return Err(SceneloomError::validation(format!(
                    "scene '{}' carries unsupported object type '{}'",
                    self.id, obj.kind
                )));
            }
            if ![obj.left, obj.top, obj.width, obj.height]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(SceneloomError::validation(format!(
                    "scene '{}' object geometry must be finite",
                    self.id
                )));
            }
            if let Some(size) = obj.font_size
                && (!size.is_finite() || size <= 0.0)
            {
                return Err(SceneloomError::validation(format!(
                    "scene '{}' object fontSize must be finite and > 0",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

impl Storyboard {
    pub fn validate(&self) -> SceneloomResult<()> {
        if self.scenes.is_empty() {
            return Err(SceneloomError::validation(
                "storyboard must contain at least one scene",
            ));
        }
        let mut ids = BTreeSet::new();
        for scene in &self.scenes {
            scene.validate()?;
            if !ids.insert(scene.id.as_str()) {
                return Err(SceneloomError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }
        if let Some(url) = &self.music_url
            && url.trim().is_empty()
        {
            return Err(SceneloomError::validation("music_url must be non-empty"));
        }
        Ok(())
    }

    /// Scenes sorted by their `order` field (then id, for stability).
    pub fn ordered_scenes(&self) -> Vec<&Scene> {
        let mut scenes: Vec<&Scene> = self.scenes.iter().collect();
        scenes.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        scenes
    }

    pub fn from_json(s: &str) -> SceneloomResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SceneloomError::serde(format!("invalid storyboard JSON: {e}")))
    }

    pub fn to_json_pretty(&self) -> SceneloomResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SceneloomError::serde(format!("storyboard JSON encoding failed: {e}")))
    }
}
