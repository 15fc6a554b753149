use std::time::Instant;

/// High-level behaviour requested by the caller.
///
/// The render policy decides whether the effect animates with the wall clock
/// or stays frozen at a fixed timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderPolicy {
    /// Advance `time` with the monotonic clock, one frame per refresh.
    #[default]
    Animate,
    /// Keep presenting frames evaluated at a single timestamp (seconds).
    Still { time: f32 },
}

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock or simulated time in seconds.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource: Send {
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Starts counting from `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that always reports the same timestamp while counting frames.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: f32,
    frame: u64,
}

impl FixedTimeSource {
    pub fn new(time: f32) -> Self {
        Self { time, frame: 0 }
    }
}

impl TimeSource for FixedTimeSource {
    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.time, self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource + Send>;

/// Builds a time source suited to the requested render policy.
pub fn time_source_for_policy(policy: &RenderPolicy) -> BoxedTimeSource {
    match policy {
        RenderPolicy::Animate => Box::new(SystemTimeSource::new()),
        RenderPolicy::Still { time } => Box::new(FixedTimeSource::new(*time)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_repeats_time_and_counts_frames() {
        let mut source = FixedTimeSource::new(2.5);
        assert_eq!(source.sample(), TimeSample::new(2.5, 0));
        assert_eq!(source.sample(), TimeSample::new(2.5, 1));
    }

    #[test]
    fn system_source_is_monotonic() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        let second = source.sample();
        assert!(second.seconds >= first.seconds);
        assert_eq!(second.frame_index, first.frame_index + 1);
    }

    #[test]
    fn policy_selects_source() {
        let mut still = time_source_for_policy(&RenderPolicy::Still { time: 4.0 });
        assert_eq!(still.sample().seconds, 4.0);
        let mut animate = time_source_for_policy(&RenderPolicy::Animate);
        assert!(animate.sample().seconds < 60.0);
    }
}
