//! Frame timing for the driver loop

use std::time::Instant;

/// How a [`FrameClock`] produces its per-frame delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Measure wall-clock time between frames
    Measured,
    /// Always report the same delta (deterministic runs, tests)
    Fixed(f32),
}

/// Frame clock producing the `dt` handed to animators and physics
///
/// Measured deltas are clamped to `max_frame_dt` so that a stalled frame
/// (debugger break, window drag) does not launch every body through the floor.
pub struct FrameClock {
    step: FrameStep,
    max_frame_dt: f32,
    last_frame: Instant,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a wall-clock frame clock
    pub fn measured(max_frame_dt: f32) -> Self {
        Self::new(FrameStep::Measured, max_frame_dt)
    }

    /// Create a clock that always reports `dt`
    pub fn fixed(dt: f32) -> Self {
        Self::new(FrameStep::Fixed(dt), dt)
    }

    /// Create a clock with an explicit step mode
    pub fn new(step: FrameStep, max_frame_dt: f32) -> Self {
        Self {
            step,
            max_frame_dt,
            last_frame: Instant::now(),
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the next frame and return its delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = match self.step {
            FrameStep::Fixed(dt) => dt,
            FrameStep::Measured => {
                let elapsed = now.duration_since(self.last_frame).as_secs_f32();
                if elapsed > self.max_frame_dt {
                    log::debug!("Frame took {:.3}s, clamping to {:.3}s", elapsed, self.max_frame_dt);
                }
                elapsed.min(self.max_frame_dt)
            }
        };
        self.last_frame = now;
        self.total_time += dt;
        self.frame_count += 1;
        dt
    }

    /// Simulated seconds handed out so far
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per simulated second
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
