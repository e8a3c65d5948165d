//! Time management utilities

use std::time::{Duration, Instant};

/// Monotonic elapsed-time accumulator driven by externally measured deltas
///
/// The clock never reads the wall clock itself; the host measures the time
/// between display refreshes (see [`FrameTimer`]) and feeds it in through
/// [`Clock::advance`]. Elapsed time only grows. Pausing freezes accumulation
/// and resuming continues from the frozen value.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: Duration,
    delta: Duration,
    frame_count: u64,
    paused: bool,
}

impl Clock {
    /// Create a clock at zero elapsed time
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame
    ///
    /// While paused the frame is counted but contributes no time.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = if self.paused { Duration::ZERO } else { delta };
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Stop accumulating time
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue accumulating time from where it was paused
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Total accumulated time
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total accumulated time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Time contributed by the most recent frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Number of frames the clock has been advanced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// High-precision wall-clock timer for measuring frame deltas
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Restart delta measurement from now, e.g. after a long wait for input
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Measure the time since the previous call (should be called once per frame)
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        elapsed
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
