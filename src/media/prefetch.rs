use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::playback::transport::TrackKind;
use crate::scene::model::{MediaKind, Scene};

/// Handle to one in-flight or completed media fetch.
///
/// Dropping the handle releases the underlying resource. A fetch superseded
/// by a scene switch must not keep loading unobserved.
pub trait PrefetchHandle {
    fn is_ready(&self) -> bool;
    fn url(&self) -> &str;
}

/// Byte-prefetch collaborator: given a URL and its declared media kind,
/// start fetching and hand back a releasable handle.
pub trait MediaPrefetcher {
    fn prefetch(&self, url: &str, kind: MediaKind) -> SceneloomResult<Box<dyn PrefetchHandle>>;
}

/// The prefetch handles for one scene, keyed by playback track.
///
/// Playback waits on [`is_ready`]. A track whose fetch failed outright is
/// recorded in [`missing`] and the scene plays without it. Dropping the set
/// releases every handle.
///
/// [`is_ready`]: ScenePrefetch::is_ready
/// [`missing`]: ScenePrefetch::missing
pub struct ScenePrefetch {
    handles: Vec<(TrackKind, Box<dyn PrefetchHandle>)>,
    missing: Vec<TrackKind>,
}

impl ScenePrefetch {
    /// Request every asset the scene (plus optional storyboard music) needs.
    pub fn prepare(
        scene: &Scene,
        music_url: Option<&str>,
        prefetcher: &dyn MediaPrefetcher,
    ) -> Self {
        let mut set = Self {
            handles: Vec::new(),
            missing: Vec::new(),
        };
        if let Some(file) = &scene.file {
            set.request(TrackKind::Visual, &file.url, file.kind, prefetcher);
        }
        if let Some(audio) = &scene.voiceover {
            set.request(TrackKind::Voiceover, &audio.url, MediaKind::Audio, prefetcher);
        }
        if let Some(audio) = &scene.sound_effect {
            set.request(
                TrackKind::SoundEffect,
                &audio.url,
                MediaKind::Audio,
                prefetcher,
            );
        }
        if let Some(url) = music_url {
            set.request(TrackKind::Music, url, MediaKind::Audio, prefetcher);
        }
        set
    }

    fn request(
        &mut self,
        track: TrackKind,
        url: &str,
        kind: MediaKind,
        prefetcher: &dyn MediaPrefetcher,
    ) {
        match prefetcher.prefetch(url, kind) {
            Ok(handle) => self.handles.push((track, handle)),
            Err(error) => {
                tracing::warn!(
                    ?track,
                    url,
                    %error,
                    "media prefetch failed, track treated as absent"
                );
                self.missing.push(track);
            }
        }
    }

    /// True once every requested track has its bytes. Failed tracks do not
    /// count against readiness.
    pub fn is_ready(&self) -> bool {
        self.handles.iter().all(|(_, handle)| handle.is_ready())
    }

    /// Tracks whose prefetch failed.
    pub fn missing(&self) -> &[TrackKind] {
        &self.missing
    }

    pub fn handle(&self, track: TrackKind) -> Option<&dyn PrefetchHandle> {
        self.handles
            .iter()
            .find(|(t, _)| *t == track)
            .map(|(_, handle)| handle.as_ref())
    }

    /// Tracks holding a live handle.
    pub fn tracks(&self) -> impl Iterator<Item = TrackKind> + '_ {
        self.handles.iter().map(|(track, _)| *track)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[derive(Default)]
struct PrefetchLog {
    failing: BTreeSet<String>,
    pending: BTreeSet<String>,
    requests: Vec<(String, MediaKind)>,
    released: Vec<String>,
    active: usize,
}

/// In-memory prefetcher for tests and demos. Clones share one log, so a
/// test can hold a copy while a `ScenePrefetch` owns the handles.
#[derive(Clone, Default)]
pub struct MemoryPrefetcher {
    log: Rc<RefCell<PrefetchLog>>,
}

impl MemoryPrefetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make future fetches of `url` fail.
    pub fn fail(&self, url: &str) {
        self.log.borrow_mut().failing.insert(url.to_string());
    }

    /// Keep `url` in flight until [`finish`] is called.
    ///
    /// [`finish`]: MemoryPrefetcher::finish
    pub fn delay(&self, url: &str) {
        self.log.borrow_mut().pending.insert(url.to_string());
    }

    pub fn finish(&self, url: &str) {
        self.log.borrow_mut().pending.remove(url);
    }

    /// URLs requested so far, with their declared kinds.
    pub fn requests(&self) -> Vec<(String, MediaKind)> {
        self.log.borrow().requests.clone()
    }

    /// URLs released by dropped handles, in drop order.
    pub fn released(&self) -> Vec<String> {
        self.log.borrow().released.clone()
    }

    /// Handles currently alive.
    pub fn active_count(&self) -> usize {
        self.log.borrow().active
    }
}

impl MediaPrefetcher for MemoryPrefetcher {
    fn prefetch(&self, url: &str, kind: MediaKind) -> SceneloomResult<Box<dyn PrefetchHandle>> {
        let mut log = self.log.borrow_mut();
        log.requests.push((url.to_string(), kind));
        if log.failing.contains(url) {
            return Err(SceneloomError::media(format!(
                "media asset unreachable: {url}"
            )));
        }
        log.active += 1;
        Ok(Box::new(MemoryHandle {
            url: url.to_string(),
            log: Rc::clone(&self.log),
        }))
    }
}

struct MemoryHandle {
    url: String,
    log: Rc<RefCell<PrefetchLog>>,
}

impl PrefetchHandle for MemoryHandle {
    fn is_ready(&self) -> bool {
        !self.log.borrow().pending.contains(&self.url)
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.active -= 1;
        log.released.push(self.url.clone());
    }
}
