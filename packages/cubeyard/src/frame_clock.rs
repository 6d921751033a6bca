//! See `FrameClock`.

use std::time::{
    Instant,
    Duration,
};


/// Longest wall-clock gap between frames that is simulated as-is. Longer gaps, like after the
/// process was suspended, reuse the previous frame's time step instead.
pub const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

/// Time step assumed before any frame has been measured.
pub const INITIAL_STEP: f32 = 1.0 / 60.0;


/// Derives each frame's time step from the wall clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    prev: Instant,
    last_step: f32,
}

impl FrameClock {
    /// Construct with `now` as the previous frame time.
    pub fn new(now: Instant) -> Self {
        FrameClock {
            prev: now,
            last_step: INITIAL_STEP,
        }
    }

    /// Call once per frame. Returns the time step to simulate, or `None` if not `live`.
    ///
    /// Frames that aren't live still move the clock reference forward, so that going live again
    /// doesn't simulate the whole pause in one step.
    pub fn frame(&mut self, now: Instant, live: bool) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.prev);
        self.prev = now;
        if !live {
            return None;
        }

        let step =
            if elapsed > MAX_FRAME_GAP {
                trace!(?elapsed, "frame gap too long, reusing previous step");
                self.last_step
            } else {
                elapsed.as_secs_f32()
            };
        self.last_step = step;
        Some(step)
    }

    /// The most recent time step returned.
    pub fn last_step(&self) -> f32 {
        self.last_step
    }
}


#[test]
fn test_step_is_elapsed_time() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(t0);
    let step = clock.frame(t0 + Duration::from_millis(20), true).unwrap();
    assert!((step - 0.02).abs() < 1e-6);
}

#[test]
fn test_long_gap_reuses_previous_step() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(t0);
    let t1 = t0 + Duration::from_millis(16);
    clock.frame(t1, true);
    let step = clock.frame(t1 + Duration::from_secs(3), true).unwrap();
    assert!((step - 0.016).abs() < 1e-6);
}

#[test]
fn test_pause_refreshes_reference() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(t0);
    assert_eq!(clock.frame(t0 + Duration::from_millis(10), false), None);
    assert_eq!(clock.frame(t0 + Duration::from_millis(90), false), None);
    let step = clock.frame(t0 + Duration::from_millis(100), true).unwrap();
    assert!((step - 0.01).abs() < 1e-6);
}
