//! Text for the heads-up display.

use std::time::{
    Instant,
    Duration,
};
use vek::*;


/// How often the frame rate is reported.
pub const FPS_REPORT_INTERVAL: Duration = Duration::from_millis(1000);


/// Viewer position readout.
pub fn position_text(pos: Vec3<f32>) -> String {
    format!("X: {:.2} Y: {:.2} Z: {:.2}", pos.x, pos.y, pos.z)
}

/// Counts frames and periodically reports the average frame rate since the last report.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            frames: 0,
            last_report: now,
        }
    }

    /// Call once per frame. Returns a new frame rate if it's time to report one.
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed <= FPS_REPORT_INTERVAL {
            return None;
        }
        let fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.last_report = now;
        Some(fps)
    }
}


#[test]
fn test_position_text() {
    assert_eq!(position_text(Vec3::new(1.0, 2.0, -3.456)), "X: 1.00 Y: 2.00 Z: -3.46");
}

#[test]
fn test_fps_counter() {
    let t0 = Instant::now();
    let mut fps = FpsCounter::new(t0);
    for i in 1..=60 {
        assert_eq!(fps.frame(t0 + Duration::from_millis(i * 16)), None);
    }
    // 61st frame lands past one second
    assert_eq!(fps.frame(t0 + Duration::from_millis(1017)), Some(60));
    assert_eq!(fps.frame(t0 + Duration::from_millis(1033)), None);
}
