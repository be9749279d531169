use crate::foundation::error::SceneloomResult;
use crate::overlay::object::OverlayObject;
use crate::scene::model::{AudioTrack, MediaFile, MediaKind, Scene, Storyboard};

/// Chainable constructor for a [`Scene`].
pub struct SceneBuilder {
    id: String,
    order: u32,
    duration: f64,
    file: Option<MediaFile>,
    voiceover: Option<AudioTrack>,
    sound_effect: Option<AudioTrack>,
    objects: Vec<OverlayObject>,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            id: id.into(),
            order: 0,
            duration: duration_secs,
            file: None,
            voiceover: None,
            sound_effect: None,
            objects: Vec::new(),
        }
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.file = Some(MediaFile {
            id: None,
            kind: MediaKind::Image,
            url: url.into(),
        });
        self
    }

    pub fn video(mut self, url: impl Into<String>) -> Self {
        self.file = Some(MediaFile {
            id: None,
            kind: MediaKind::Video,
            url: url.into(),
        });
        self
    }

    pub fn voiceover(mut self, url: impl Into<String>) -> Self {
        self.voiceover = Some(AudioTrack {
            id: None,
            url: url.into(),
            volume: 1.0,
        });
        self
    }

    pub fn sound_effect(mut self, url: impl Into<String>) -> Self {
        self.sound_effect = Some(AudioTrack {
            id: None,
            url: url.into(),
            volume: 1.0,
        });
        self
    }

    pub fn object(mut self, object: OverlayObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn build(self) -> SceneloomResult<Scene> {
        let scene = Scene {
            id: self.id,
            order: self.order,
            duration: self.duration,
            file: self.file,
            voiceover: self.voiceover,
            sound_effect: self.sound_effect,
            objects: self.objects,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Chainable constructor for a [`Storyboard`].
///
/// Scene order defaults to insertion order when not set explicitly.
#[derive(Default)]
pub struct StoryboardBuilder {
    scenes: Vec<Scene>,
    music_url: Option<String>,
}

impl StoryboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(mut self, mut scene: Scene) -> Self {
        if scene.order == 0 && !self.scenes.is_empty() {
            scene.order = self.scenes.len() as u32;
        }
        self.scenes.push(scene);
        self
    }

    pub fn music(mut self, url: impl Into<String>) -> Self {
        self.music_url = Some(url.into());
        self
    }

    pub fn build(self) -> SceneloomResult<Storyboard> {
        let storyboard = Storyboard {
            scenes: self.scenes,
            music_url: self.music_url,
        };
        storyboard.validate()?;
        Ok(storyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_valid_storyboard() {
        let sb = StoryboardBuilder::new()
            .scene(
                SceneBuilder::new("intro", 3.0)
                    .image("https://media.test/intro.png")
                    .voiceover("https://media.test/intro.mp3")
                    .object(OverlayObject::text_box("Welcome"))
                    .build()
                    .unwrap(),
            )
            .scene(
                SceneBuilder::new("body", 5.0)
                    .video("https://media.test/body.mp4")
                    .build()
                    .unwrap(),
            )
            .music("https://media.test/theme.mp3")
            .build()
            .unwrap();

        assert_eq!(sb.scenes.len(), 2);
        assert_eq!(sb.scenes[1].order, 1);
        assert_eq!(sb.ordered_scenes()[0].id, "intro");
    }

    #[test]
    fn build_rejects_invalid_scenes() {
        assert!(SceneBuilder::new("", 3.0).build().is_err());
        assert!(SceneBuilder::new("x", -1.0).build().is_err());
    }
}
