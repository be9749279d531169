use std::cell::RefCell;
use std::rc::Rc;

/// Media tracks a scene can drive in parallel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackKind {
    /// Generated image or video clip.
    Visual,
    Voiceover,
    SoundEffect,
    /// Background music, shared across the whole composition.
    Music,
}

/// Control surface of one underlying media element.
///
/// Implementations wrap whatever actually plays bytes (a media element, an
/// audio sink). A static image is a valid transport whose calls are no-ops;
/// it simply never reports an end. Transports are commanded, never polled:
/// the synchronizer's master clock decides when a scene is over.
pub trait TrackTransport {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek back to time zero.
    fn seek_start(&mut self);
    fn set_volume(&mut self, volume: f64);
}

#[derive(Debug)]
struct TransportLog {
    playing: bool,
    volume: f64,
    plays: u32,
    pauses: u32,
    seeks: u32,
}

impl Default for TransportLog {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            plays: 0,
            pauses: 0,
            seeks: 0,
        }
    }
}

/// Recording transport for tests and dry runs.
///
/// Clones share state, so a test can keep one handle for assertions and
/// attach the other to a synchronizer.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    log: Rc<RefCell<TransportLog>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.log.borrow().playing
    }

    pub fn volume(&self) -> f64 {
        self.log.borrow().volume
    }

    pub fn play_count(&self) -> u32 {
        self.log.borrow().plays
    }

    pub fn pause_count(&self) -> u32 {
        self.log.borrow().pauses
    }

    pub fn seek_count(&self) -> u32 {
        self.log.borrow().seeks
    }

    /// Simulate this element reaching its natural end: it stops on its own.
    pub fn finish_naturally(&self) {
        self.log.borrow_mut().playing = false;
    }
}

impl TrackTransport for MemoryTransport {
    fn play(&mut self) {
        let mut log = self.log.borrow_mut();
        log.playing = true;
        log.plays += 1;
    }

    fn pause(&mut self) {
        let mut log = self.log.borrow_mut();
        log.playing = false;
        log.pauses += 1;
    }

    fn seek_start(&mut self) {
        self.log.borrow_mut().seeks += 1;
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.borrow_mut().volume = volume;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_recorded_state() {
        let handle = MemoryTransport::new();
        let mut attached = handle.clone();

        attached.play();
        attached.set_volume(0.5);
        assert!(handle.is_playing());
        assert_eq!(handle.volume(), 0.5);
        assert_eq!(handle.play_count(), 1);

        attached.pause();
        assert!(!handle.is_playing());
        assert_eq!(handle.pause_count(), 1);
    }
}
