/// Largest frame delta accepted by the clock, in milliseconds.
/// A backgrounded tab can report multi-second gaps; clamping keeps timed
/// sequences from jumping several stages in one frame.
pub const MAX_FRAME_MS: f32 = 250.0;

/// Frame counter driven by the display refresh.
///
/// Effects never receive an explicit delta for motion: they read the tick
/// counter, which advances by exactly one per callback. Wall-clock milliseconds
/// are tracked alongside for the few sequences that run on real time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: u64,
    elapsed_ms: f64,
    cancelled: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            tick: 0,
            elapsed_ms: 0.0,
            cancelled: false,
        }
    }

    /// Advance by one frame. Returns the new tick, or `None` once cancelled.
    pub fn advance(&mut self, frame_dt_ms: f32) -> Option<u64> {
        if self.cancelled {
            return None;
        }
        self.tick += 1;
        self.elapsed_ms += clamp_frame_ms(frame_dt_ms) as f64;
        Some(self.tick)
    }

    /// Stop producing ticks. Irreversible.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_MS]`. Non-finite input counts as zero.
pub fn clamp_frame_ms(frame_dt_ms: f32) -> f32 {
    if frame_dt_ms.is_finite() {
        frame_dt_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        0.0
    }
}

/// Millisecond timer for one stage of a timed sequence.
///
/// `consume` spends frame time against a deadline and hands back whatever is
/// left over, so a long frame can carry surplus time into the next stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimer {
    elapsed_ms: f32,
}

impl StageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend up to `*remaining_ms` toward `deadline_ms`.
    /// Returns true when the deadline was reached; `remaining_ms` is reduced by
    /// the time actually used.
    pub fn consume(&mut self, deadline_ms: f32, remaining_ms: &mut f32) -> bool {
        let left = (deadline_ms - self.elapsed_ms).max(0.0);
        if *remaining_ms < left {
            self.elapsed_ms += *remaining_ms;
            *remaining_ms = 0.0;
            false
        } else {
            *remaining_ms -= left;
            self.elapsed_ms = deadline_ms;
            true
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Fraction of `duration_ms` elapsed, clamped to [0, 1].
    pub fn progress(&self, duration_ms: f32) -> f32 {
        if duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / duration_ms).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(16.0), Some(1));
        assert_eq!(clock.advance(16.0), Some(2));
        assert_eq!(clock.tick(), 2);
        assert!((clock.elapsed_ms() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn cancelled_clock_stops_ticking() {
        let mut clock = FrameClock::new();
        clock.advance(16.0);
        clock.cancel();
        assert_eq!(clock.advance(16.0), None);
        assert_eq!(clock.tick(), 1);
    }

    #[test]
    fn huge_frames_are_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(10_000.0);
        assert_eq!(clock.elapsed_ms(), MAX_FRAME_MS as f64);
        assert_eq!(clamp_frame_ms(f32::NAN), 0.0);
        assert_eq!(clamp_frame_ms(-5.0), 0.0);
    }

    #[test]
    fn stage_timer_carries_surplus() {
        let mut timer = StageTimer::new();
        let mut remaining = 300.0;
        assert!(!timer.consume(420.0, &mut remaining));
        assert_eq!(remaining, 0.0);

        let mut remaining = 200.0;
        assert!(timer.consume(420.0, &mut remaining));
        assert!((remaining - 80.0).abs() < 1e-4, "surplus was {}", remaining);
    }

    #[test]
    fn stage_timer_progress_clamps() {
        let mut timer = StageTimer::new();
        let mut remaining = 50.0;
        timer.consume(100.0, &mut remaining);
        assert!((timer.progress(100.0) - 0.5).abs() < 1e-6);
        assert_eq!(timer.progress(0.0), 1.0);
    }
}
