use std::time::{Duration, Instant};

use crate::foundation::error::{SceneloomError, SceneloomResult};
use crate::playback::transport::{TrackKind, TrackTransport};

/// Poll cadence embedders drive [`PlaybackSynchronizer::tick`] at.
pub const MASTER_TICK: Duration = Duration::from_millis(100);

/// Per-track latched playback state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackState {
    /// The track reached its natural end and stays paused until a reset.
    pub ended: bool,
    /// Static volume multiplier.
    pub volume: f64,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            ended: false,
            volume: 1.0,
        }
    }
}

/// Result of one master-clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Not playing; nothing to advance.
    Idle,
    Playing,
    /// The scene duration elapsed; every track was reset to time zero.
    Ended,
}

struct Track {
    kind: TrackKind,
    transport: Box<dyn TrackTransport>,
    state: TrackState,
}

/// Drives one scene's tracks (visual plus up to three audio) in lockstep.
///
/// The scene's authoritative `duration` is the master clock, not any track's
/// native length: a static image has no duration signal, and playback must
/// agree with the sequencing frame math. Embedders call [`tick`] on a
/// [`MASTER_TICK`] cadence; once accumulated play time reaches the duration,
/// every track is forced to time zero, ended latches clear, and the tick
/// reports [`PlaybackStatus::Ended`] so callers can auto-stop or loop.
///
/// Tracks that end early (a short sound effect) latch their own ended flag
/// and stay paused while the rest continue; nothing resynchronizes them
/// mid-scene.
///
/// [`tick`]: PlaybackSynchronizer::tick
pub struct PlaybackSynchronizer {
    duration: Duration,
    tracks: Vec<Track>,
    playing: bool,
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl PlaybackSynchronizer {
    /// Create a synchronizer for a scene lasting `duration_secs`.
    pub fn new(duration_secs: f64) -> SceneloomResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(SceneloomError::validation(
                "playback duration must be finite and > 0 seconds",
            ));
        }
        Ok(Self {
            duration: Duration::from_secs_f64(duration_secs),
            tracks: Vec::new(),
            playing: false,
            accumulated: Duration::ZERO,
            resumed_at: None,
        })
    }

    /// Attach the transport for one track. Each kind may appear once.
    pub fn attach(
        &mut self,
        kind: TrackKind,
        transport: Box<dyn TrackTransport>,
    ) -> SceneloomResult<()> {
        if self.tracks.iter().any(|t| t.kind == kind) {
            return Err(SceneloomError::validation(format!(
                "track {kind:?} is already attached"
            )));
        }
        self.tracks.push(Track {
            kind,
            transport,
            state: TrackState::default(),
        });
        Ok(())
    }

    pub fn has_track(&self, kind: TrackKind) -> bool {
        self.tracks.iter().any(|t| t.kind == kind)
    }

    pub fn track_state(&self, kind: TrackKind) -> Option<TrackState> {
        self.tracks.iter().find(|t| t.kind == kind).map(|t| t.state)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start every track that has not ended. Ended tracks stay paused.
    pub fn play(&mut self, now: Instant) {
        if self.playing {
            return;
        }
        for track in &mut self.tracks {
            if !track.state.ended {
                track.transport.play();
            }
        }
        self.playing = true;
        self.resumed_at = Some(now);
    }

    /// Pause every track regardless of ended state.
    pub fn pause(&mut self, now: Instant) {
        for track in &mut self.tracks {
            track.transport.pause();
        }
        if self.playing
            && let Some(resumed) = self.resumed_at
        {
            self.accumulated += now.duration_since(resumed);
        }
        self.playing = false;
        self.resumed_at = None;
    }

    /// Latch a track's natural end. Returns `false` for an unattached kind.
    ///
    /// Called from the media element's own end signal; the element has
    /// already stopped, the latch just keeps [`play`] from restarting it.
    ///
    /// [`play`]: PlaybackSynchronizer::play
    pub fn mark_ended(&mut self, kind: TrackKind) -> bool {
        match self.tracks.iter_mut().find(|t| t.kind == kind) {
            Some(track) => {
                track.state.ended = true;
                true
            }
            None => false,
        }
    }

    /// Set a track's volume multiplier. Returns `false` for an unattached
    /// kind.
    pub fn set_volume(&mut self, kind: TrackKind, volume: f64) -> SceneloomResult<bool> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(SceneloomError::validation(
                "volume must be finite and >= 0",
            ));
        }
        match self.tracks.iter_mut().find(|t| t.kind == kind) {
            Some(track) => {
                track.state.volume = volume;
                track.transport.set_volume(volume);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Play time accumulated so far.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(resumed) if self.playing => self.accumulated + now.duration_since(resumed),
            _ => self.accumulated,
        }
    }

    /// Advance the master clock.
    ///
    /// Authoritative end-of-scene check: once elapsed play time reaches the
    /// scene duration, every track resets uniformly and the caller is told
    /// the scene ended.
    pub fn tick(&mut self, now: Instant) -> PlaybackStatus {
        if !self.playing {
            return PlaybackStatus::Idle;
        }
        if self.elapsed(now) >= self.duration {
            tracing::debug!(duration_secs = self.duration.as_secs_f64(), "scene ended");
            self.reset();
            return PlaybackStatus::Ended;
        }
        PlaybackStatus::Playing
    }

    /// Force every track to time zero, clear ended latches, stop the clock.
    ///
    /// Used on scene end and on explicit replay-from-start commands.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.transport.pause();
            track.transport.seek_start();
            track.state.ended = false;
        }
        self.playing = false;
        self.accumulated = Duration::ZERO;
        self.resumed_at = None;
    }
}
