use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames kept for the rolling average.
const WINDOW: usize = 60;

/// Rolling frame-rate statistics, logged at a fixed interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times_ms: VecDeque<f32>,
    interval:       Duration,
    last_log:       Option<Instant>,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            frame_times_ms: VecDeque::with_capacity(WINDOW),
            interval,
            last_log: None,
        }
    }

    /// Records one frame of `dt` seconds ending at `now`.
    ///
    /// Returns `true` when this frame triggered a log line.
    pub fn record(&mut self, dt: f32, now: Instant) -> bool {
        self.frame_times_ms.push_back(dt * 1000.0);
        if self.frame_times_ms.len() > WINDOW {
            self.frame_times_ms.pop_front();
        }

        let Some(last) = self.last_log else {
            self.last_log = Some(now);
            return false;
        };
        if now.duration_since(last) < self.interval {
            return false;
        }

        self.last_log = Some(now);
        if let Some(fps) = self.fps() {
            log::info!("{fps:.1} fps ({:.2} ms/frame)", self.avg_frame_ms());
        }
        true
    }

    /// Mean frame time over the window, in milliseconds.
    pub fn avg_frame_ms(&self) -> f32 {
        if self.frame_times_ms.is_empty() {
            return 0.0;
        }
        self.frame_times_ms.iter().sum::<f32>() / self.frame_times_ms.len() as f32
    }

    /// Frames per second over the window; `None` until a frame is recorded.
    pub fn fps(&self) -> Option<f32> {
        let avg = self.avg_frame_ms();
        (avg > 0.0).then(|| 1000.0 / avg)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_stats_have_no_fps() {
        let stats = FrameStats::new(Duration::from_secs(1));
        assert_eq!(stats.fps(), None);
        assert_eq!(stats.avg_frame_ms(), 0.0);
    }

    #[test]
    fn average_uses_the_last_window() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        let t0 = Instant::now();
        for _ in 0..WINDOW {
            stats.record(0.1, t0);
        }
        for _ in 0..WINDOW {
            stats.record(0.02, t0);
        }
        assert_relative_eq!(stats.avg_frame_ms(), 20.0, epsilon = 1e-3);
        assert_relative_eq!(stats.fps().unwrap_or_default(), 50.0, epsilon = 1e-2);
    }

    #[test]
    fn logs_once_per_interval() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        let t0 = Instant::now();

        assert!(!stats.record(0.016, t0));
        assert!(!stats.record(0.016, t0 + Duration::from_millis(500)));
        assert!(stats.record(0.016, t0 + Duration::from_millis(1000)));
        assert!(!stats.record(0.016, t0 + Duration::from_millis(1500)));
        assert!(stats.record(0.016, t0 + Duration::from_millis(2100)));
    }
}
