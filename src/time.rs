use instant::Instant;

const MS_TO_SECONDS: f64 = 0.001;

/// Source of wall-clock samples, in milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock, `performance.now()` on the web and `std::time::Instant` elsewhere.
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Turns timestamps into frame deltas.
///
/// The baseline for the next frame is stored in the same call that measures the
/// current delta, so time spent by the client after `tick` never leaks into the
/// following frame's delta.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    /// timestamp of the previous tick, in milliseconds
    last_timestamp: Option<f64>,
    /// seconds elapsed in the last frame
    elapsed: f32,
    /// seconds elapsed over all ticks since the last reset
    total_elapsed: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.last_timestamp = Some(now_ms);
        self.elapsed = 0.0;
        self.total_elapsed = 0.0;
        self.frame_count = 0;
    }

    /// Returns the seconds elapsed since the previous tick (or reset), never negative.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let last = self.last_timestamp.replace(now_ms).unwrap_or(now_ms);
        // Date-like sources can step backwards
        let delta_ms = (now_ms - last).max(0.0);

        self.elapsed = (delta_ms * MS_TO_SECONDS) as f32;
        self.total_elapsed += self.elapsed;
        self.frame_count += 1;

        self.elapsed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_elapsed(&self) -> f32 {
        self.total_elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}
