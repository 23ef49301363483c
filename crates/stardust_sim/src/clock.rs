use stardust_core::{PERFORMANCE_BODY_LIMIT, PERFORMANCE_CHECK_INTERVAL, PERFORMANCE_MIN_FPS};

/// Pause state, running time, frame rate and the performance-mode flag for one
/// simulation instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimClock {
    pub paused: bool,
    /// Seconds of unpaused running time
    elapsed: f64,
    /// Physics ticks stepped
    ticks: u64,
    /// Last measured paint rate, None until a full window was seen
    fps: Option<u32>,
    window_frames: u32,
    window_time: f64,
    performance_mode: bool,
    since_check: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    pub fn performance_mode(&self) -> bool {
        self.performance_mode
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Count one painted frame that took `dt` wall seconds
    pub fn record_frame(&mut self, dt: f64) {
        if !(dt.is_finite() && dt >= 0.0) {
            return;
        }
        self.window_frames += 1;
        self.window_time += dt;
        if self.window_time >= 1.0 {
            self.fps = Some((self.window_frames as f64 / self.window_time).round() as u32);
            self.window_frames = 0;
            self.window_time = 0.0;
        }
    }

    /// Account for one stepped tick of `dt` running seconds.
    ///
    /// Every [`PERFORMANCE_CHECK_INTERVAL`] seconds the performance flag is
    /// re-evaluated against the body count and measured frame rate. Returns the
    /// new flag when it flipped.
    pub fn advance(&mut self, dt: f64, body_count: usize) -> Option<bool> {
        self.ticks += 1;
        self.elapsed += dt;
        self.since_check += dt;

        if self.since_check < PERFORMANCE_CHECK_INTERVAL {
            return None;
        }
        self.since_check = 0.0;

        let slow = self.fps.is_some_and(|fps| fps < PERFORMANCE_MIN_FPS);
        let wanted = body_count > PERFORMANCE_BODY_LIMIT || slow;
        if wanted == self.performance_mode {
            return None;
        }
        self.performance_mode = wanted;
        Some(wanted)
    }

    /// Collisions run every tick, or every second tick in performance mode
    pub fn collisions_due(&self) -> bool {
        !self.performance_mode || self.ticks % 2 == 0
    }
}
