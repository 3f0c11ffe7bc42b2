//! Time-based procedural animation
//!
//! An [`AnimationTrack`] applies one kind of change to one node at a constant
//! rate for a fixed duration. An [`Animator`] plays a set of tracks together.
//! Animators run before physics within a frame, since both touch position.

mod animator;
mod track;

pub use animator::Animator;
pub use track::{
    Animation, AnimationError, AnimationTrack, RotationAnimation, ScaleAnimation, TranslationAnimation,
};
