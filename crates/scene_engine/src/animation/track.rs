//! Time-bounded procedural animation of a single node

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::scene::{NodePath, SceneError, SceneNode};

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Durations must be finite and positive
    #[error("Invalid animation duration {0}: must be finite and > 0")]
    InvalidDuration(f32),

    /// The target node could not be found
    #[error("Animation target error: {0}")]
    Target(#[from] SceneError),
}

/// A continuous change applied to a node at a constant rate
///
/// Implementations only know how to apply `dt` seconds worth of change;
/// the owning [`AnimationTrack`] decides how much time is left to apply.
pub trait Animation: Send + Sync {
    /// Apply `dt` seconds of change to `node`
    fn apply(&self, node: &mut SceneNode, dt: f32);
}

/// Moves a node at a constant velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationAnimation {
    per_second: Vec3,
}

impl TranslationAnimation {
    /// Cover `total` over `duration` seconds
    pub fn from_total(total: Vec3, duration: f32) -> Self {
        Self {
            per_second: total / duration,
        }
    }

    /// Translation applied per second
    pub fn per_second(&self) -> &Vec3 {
        &self.per_second
    }
}

impl Animation for TranslationAnimation {
    fn apply(&self, node: &mut SceneNode, dt: f32) {
        node.move_by(self.per_second * dt);
    }
}

/// Turns a node's Euler angles at a constant rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAnimation {
    per_second: Vec3,
}

impl RotationAnimation {
    /// Turn by `total` radians over `duration` seconds
    pub fn from_total(total: Vec3, duration: f32) -> Self {
        Self {
            per_second: total / duration,
        }
    }

    /// Angles added per second
    pub fn per_second(&self) -> &Vec3 {
        &self.per_second
    }
}

impl Animation for RotationAnimation {
    fn apply(&self, node: &mut SceneNode, dt: f32) {
        node.rotate_by(self.per_second * dt);
    }
}

/// Changes a node's scale linearly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAnimation {
    per_second: Vec3,
}

impl ScaleAnimation {
    /// Add `total` to the scale over `duration` seconds
    pub fn from_total(total: Vec3, duration: f32) -> Self {
        Self {
            per_second: total / duration,
        }
    }
}

impl Animation for ScaleAnimation {
    fn apply(&self, node: &mut SceneNode, dt: f32) {
        let scale = node.scale() + self.per_second * dt;
        node.set_scale(scale);
    }
}

/// One animation bound to a target node and a duration
///
/// The last step is clamped to the time remaining, so the total change
/// applied equals the configured total however the frames are sliced.
/// Once complete, further advances do nothing.
pub struct AnimationTrack {
    target: NodePath,
    duration: f32,
    elapsed: f32,
    animation: Box<dyn Animation>,
}

impl AnimationTrack {
    /// Bind a rate-based animation to `target` for `duration` seconds
    pub fn new(target: NodePath, duration: f32, animation: Box<dyn Animation>) -> Result<Self, AnimationError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(AnimationError::InvalidDuration(duration));
        }
        Ok(Self {
            target,
            duration,
            elapsed: 0.0,
            animation,
        })
    }

    /// Move `target` by `total` over `duration` seconds
    pub fn translation(target: NodePath, duration: f32, total: Vec3) -> Result<Self, AnimationError> {
        Self::new(target, duration, Box::new(TranslationAnimation::from_total(total, duration)))
    }

    /// Turn `target` by `total` radians over `duration` seconds
    pub fn rotation(target: NodePath, duration: f32, total: Vec3) -> Result<Self, AnimationError> {
        Self::new(target, duration, Box::new(RotationAnimation::from_total(total, duration)))
    }

    /// Add `total` to the scale of `target` over `duration` seconds
    pub fn scale(target: NodePath, duration: f32, total: Vec3) -> Result<Self, AnimationError> {
        Self::new(target, duration, Box::new(ScaleAnimation::from_total(total, duration)))
    }

    /// Node this track animates
    pub fn target(&self) -> &NodePath {
        &self.target
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds consumed so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the duration consumed, 0..=1
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    /// Whether the whole duration has been applied
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rewind to the beginning (the target keeps its current state)
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Apply up to `dt` seconds of change to the target
    ///
    /// Non-positive `dt` and completed tracks are no-ops; a completed track
    /// does not even look its target up.
    pub fn advance(&mut self, dt: f32, roots: &mut [SceneNode]) -> Result<(), AnimationError> {
        if self.is_complete() || dt.is_nan() || dt <= 0.0 {
            return Ok(());
        }

        let node = self.target.resolve_mut(roots)?;
        let remaining = self.duration - self.elapsed;
        if dt >= remaining {
            self.animation.apply(node, remaining);
            self.elapsed = self.duration;
            log::debug!("Animation on {} complete after {:.2}s", self.target, self.duration);
        } else {
            self.animation.apply(node, dt);
            self.elapsed += dt;
        }
        Ok(())
    }
}

impl std::fmt::Debug for AnimationTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationTrack")
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MeshDrawable;
    use approx::assert_relative_eq;

    fn roots() -> Vec<SceneNode> {
        let mut node = SceneNode::new(vec![MeshDrawable::new("bunny", 3).into_handle()]).unwrap();
        node.set_position(Vec3::new(1.0, 0.0, 0.0));
        vec![node]
    }

    #[test]
    fn test_invalid_durations() {
        let path = NodePath::root(0);
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                AnimationTrack::translation(path.clone(), bad, Vec3::zeros()),
                Err(AnimationError::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn test_oversized_step_is_clamped() {
        let mut roots = roots();
        let mut track = AnimationTrack::translation(NodePath::root(0), 1.0, Vec3::new(0.0, 4.0, 0.0)).unwrap();

        track.advance(0.75, &mut roots).unwrap();
        track.advance(0.75, &mut roots).unwrap();

        assert!(track.is_complete());
        assert_eq!(track.elapsed(), 1.0);
        assert_relative_eq!(*roots[0].position(), Vec3::new(1.0, 4.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_track() {
        let mut roots = roots();
        let total = Vec3::new(0.0, std::f32::consts::TAU, 0.0);
        let mut track = AnimationTrack::rotation(NodePath::root(0), 10.0, total).unwrap();
        track.advance(5.0, &mut roots).unwrap();
        assert_relative_eq!(track.progress(), 0.5);
        assert_relative_eq!(*roots[0].orientation(), total / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scale_track() {
        let mut roots = roots();
        let mut track = AnimationTrack::scale(NodePath::root(0), 2.0, Vec3::new(1.0, 1.0, 1.0)).unwrap();
        track.advance(1.0, &mut roots).unwrap();
        track.advance(1.0, &mut roots).unwrap();
        assert_relative_eq!(*roots[0].scale(), Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_missing_target_reports_error() {
        let mut roots = roots();
        let mut track = AnimationTrack::translation(NodePath::root(0).child(2), 1.0, Vec3::x()).unwrap();
        assert_eq!(
            track.advance(0.1, &mut roots),
            Err(AnimationError::Target(SceneError::ChildNotFound { index: 2, len: 0 }))
        );
        assert_eq!(track.elapsed(), 0.0);
    }

    #[test]
    fn test_non_positive_dt_ignored() {
        let mut roots = roots();
        let mut track = AnimationTrack::translation(NodePath::root(0), 1.0, Vec3::x()).unwrap();
        track.advance(0.0, &mut roots).unwrap();
        track.advance(-0.5, &mut roots).unwrap();
        assert_eq!(track.elapsed(), 0.0);
        assert_eq!(*roots[0].position(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset_rewinds() {
        let mut roots = roots();
        let mut track = AnimationTrack::translation(NodePath::root(0), 1.0, Vec3::x()).unwrap();
        track.advance(2.0, &mut roots).unwrap();
        track.reset();
        assert!(!track.is_complete());
        track.advance(2.0, &mut roots).unwrap();
        assert_relative_eq!(roots[0].position().x, 3.0, epsilon = 1e-6);
    }
}
