//! Parallel playback of animation tracks

use super::track::{AnimationError, AnimationTrack};
use crate::scene::SceneNode;

/// A group of tracks that play together
///
/// All tracks start at once and run side by side; there is no sequencing.
/// Independent animators are not coordinated with each other.
#[derive(Debug, Default)]
pub struct Animator {
    tracks: Vec<AnimationTrack>,
    running: bool,
}

impl Animator {
    /// Create an empty, stopped animator
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a track
    #[must_use]
    pub fn with_track(mut self, track: AnimationTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Add a track
    pub fn add_track(&mut self, track: AnimationTrack) {
        self.tracks.push(track);
    }

    /// Tracks in insertion order
    pub fn tracks(&self) -> &[AnimationTrack] {
        &self.tracks
    }

    /// Start playback from the beginning of every track
    ///
    /// Calling `start` on a running animator changes nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        for track in &mut self.tracks {
            track.reset();
        }
        self.running = true;
        log::debug!("Animator started with {} track(s)", self.tracks.len());
    }

    /// Pause playback; a later `start` rewinds
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether `start` has been called since the last `stop`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether every track has applied its full duration
    pub fn is_finished(&self) -> bool {
        self.tracks.iter().all(AnimationTrack::is_complete)
    }

    /// Advance every track by `dt`
    ///
    /// Completed tracks are still visited and ignore the call themselves.
    /// A track whose target cannot be found does not hold back the others;
    /// the first such error is returned once every track has been advanced.
    /// Nothing happens while the animator is stopped.
    pub fn tick(&mut self, dt: f32, roots: &mut [SceneNode]) -> Result<(), AnimationError> {
        if !self.running {
            return Ok(());
        }
        let mut first_error = None;
        for track in &mut self.tracks {
            if let Err(err) = track.advance(dt, roots) {
                log::warn!("Skipping animation on {}: {}", track.target(), err);
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
