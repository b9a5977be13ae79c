//! Frame-counted phase machine.

use std::fmt::Debug;

/// A phase change reported by [`PhaseClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<P> {
    pub from: P,
    pub to: P,
}

/// One active phase plus the number of frames spent in it.
///
/// Timed exits come from the caller (`expire`), so durations can live in the
/// owning effect's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseClock<P> {
    phase: P,
    frames: u32,
}

impl<P: Copy + Eq + Debug> PhaseClock<P> {
    pub fn new(phase: P) -> Self {
        Self { phase, frames: 0 }
    }

    pub fn phase(&self) -> P {
        self.phase
    }

    /// Frames since entering the current phase.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is(&self, phase: P) -> bool {
        self.phase == phase
    }

    /// Count one frame in the current phase.
    pub fn tick(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Fraction of `duration` frames elapsed, clamped to [0, 1].
    pub fn progress(&self, duration: u32) -> f32 {
        if duration == 0 {
            1.0
        } else {
            (self.frames as f32 / duration as f32).min(1.0)
        }
    }

    /// Enter `next` and reset the clock.
    pub fn enter(&mut self, next: P) -> Transition<P> {
        let from = self.phase;
        self.phase = next;
        self.frames = 0;
        Transition { from, to: next }
    }

    /// Enter `next` only when `allowed(current)` holds. A refused trigger
    /// leaves phase and clock untouched.
    pub fn trigger(&mut self, next: P, allowed: impl FnOnce(P) -> bool) -> Option<Transition<P>> {
        if allowed(self.phase) {
            Some(self.enter(next))
        } else {
            None
        }
    }

    /// Apply a timed exit. `timeout` maps a phase to `(frames, next)`, or
    /// `None` for phases that hold until triggered.
    pub fn expire(&mut self, timeout: impl FnOnce(P) -> Option<(u32, P)>) -> Option<Transition<P>> {
        match timeout(self.phase) {
            Some((limit, next)) if self.frames >= limit => Some(self.enter(next)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Off,
        Flash,
        Fade,
    }

    fn timeout(p: Light) -> Option<(u32, Light)> {
        match p {
            Light::Off => None,
            Light::Flash => Some((3, Light::Fade)),
            Light::Fade => Some((2, Light::Off)),
        }
    }

    #[test]
    fn timed_chain_runs_exact_frame_counts() {
        let mut clock = PhaseClock::new(Light::Off);
        clock.enter(Light::Flash);
        let mut frames_in_flash = 0;
        while clock.is(Light::Flash) {
            clock.tick();
            frames_in_flash += 1;
            clock.expire(timeout);
        }
        assert_eq!(frames_in_flash, 3);
        clock.tick();
        assert!(clock.expire(timeout).is_none());
        clock.tick();
        assert_eq!(clock.expire(timeout), Some(Transition { from: Light::Fade, to: Light::Off }));
        clock.tick();
        assert!(clock.expire(timeout).is_none());
    }

    #[test]
    fn refused_trigger_is_a_no_op() {
        let mut clock = PhaseClock::new(Light::Flash);
        clock.tick();
        let before = clock;
        assert!(clock.trigger(Light::Flash, |p| p != Light::Flash).is_none());
        assert_eq!(clock, before);
    }

    #[test]
    fn progress_clamps() {
        let mut clock = PhaseClock::new(Light::Fade);
        assert_eq!(clock.progress(4), 0.0);
        for _ in 0..6 {
            clock.tick();
        }
        assert_eq!(clock.progress(4), 1.0);
        assert_eq!(clock.progress(0), 1.0);
    }
}
