//! Shared utilities

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// HSV to RGB color conversion
/// h: degrees, any value (wraps every 360), s: 0-1, v: 0-1
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let h_prime = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call once per frame to record timing
    /// Returns (delta_time, average_fps)
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        (dt, self.avg_fps())
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    /// Average FPS over the sample window
    pub fn avg_fps(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }
}

// ============================================================================
// Frame Limiter
// ============================================================================

/// Caps the loop at a fixed frame rate by sleeping off the unused part of
/// each frame
pub struct FrameLimiter {
    frame_time: Duration,
    last_frame: Instant,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_frame: Instant::now(),
        }
    }

    /// Time left to sleep when `elapsed` of the frame has been used
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.frame_time.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Block until at least one frame time has passed since the last call
    pub fn wait(&mut self) {
        if let Some(remaining) = self.remaining(self.last_frame.elapsed()) {
            thread::sleep(remaining);
        }
        self.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), (255, 255, 0));
    }

    #[test]
    fn test_hsv_wraps() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(480.0, 1.0, 1.0), hsv_to_rgb(120.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
    }

    #[test]
    fn test_hsv_gray() {
        assert_eq!(hsv_to_rgb(200.0, 0.0, 0.5), (128, 128, 128));
        assert_eq!(hsv_to_rgb(10.0, 1.0, 0.0), (0, 0, 0));
    }

    #[test]
    fn test_fps_average() {
        let mut fps = FpsCounter::new(4);
        assert_eq!(fps.avg_fps(), 0.0);
        for _ in 0..10 {
            fps.record(0.02);
        }
        assert_eq!(fps.frame_times.len(), 4);
        assert!((fps.avg_fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_limiter_frame_time() {
        let limiter = FrameLimiter::new(60);
        assert_eq!(limiter.frame_time, Duration::from_nanos(16_666_666));
        assert_eq!(limiter.remaining(Duration::ZERO), Some(limiter.frame_time));
    }

    #[test]
    fn test_limiter_remaining() {
        let limiter = FrameLimiter::new(50);
        assert_eq!(
            limiter.remaining(Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(limiter.remaining(Duration::from_millis(20)), None);
        assert_eq!(limiter.remaining(Duration::from_millis(35)), None);
    }

    #[test]
    fn test_limiter_waits_a_frame() {
        let mut limiter = FrameLimiter::new(100);
        limiter.wait();
        let start = Instant::now();
        limiter.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }
}
