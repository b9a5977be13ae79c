//! Launch countdown: timed steps, then ignition, liftoff, fade and completion.
//!
//! Runs on wall-clock milliseconds. Each stage has a deadline on a
//! [`StageTimer`]; time left over when a deadline is hit flows into the next
//! stage, so long frames never stretch the sequence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::time::StageTimer;
use crate::extensions::easing::Easing;
use crate::systems::rng::Rng;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLabel {
    pub label: String,
    pub status: String,
}

impl StepLabel {
    pub fn new(label: &str, status: &str) -> Self {
        Self { label: label.to_string(), status: status.to_string() }
    }
}

fn default_steps() -> Vec<StepLabel> {
    [
        ("T-10", "SYSTEMS CHECK"),
        ("T-9", "FUEL PRESSURIZATION"),
        ("T-8", "NAVIGATION ONLINE"),
        ("T-7", "GUIDANCE SYSTEMS ARM"),
        ("T-6", "ENGINE IGNITION SEQ"),
        ("T-5", "THRUST NOMINAL"),
        ("T-4", "PAYLOAD CONFIRMED"),
        ("T-3", "LAUNCH DIRECTOR GO"),
        ("T-2", "RANGE CLEAR"),
        ("T-1", "FULL THROTTLE"),
        ("T-0", "IGNITION"),
    ]
    .into_iter()
    .map(|(label, status)| StepLabel::new(label, status))
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub steps: Vec<StepLabel>,
    /// Delay before the first step.
    pub first_step_ms: f32,
    /// Delay between later steps.
    pub step_ms: f32,
    /// From the final step to liftoff.
    pub ignition_ms: f32,
    /// Shake of the big number right after liftoff.
    pub glitch_ms: f32,
    /// From liftoff to the start of the fade.
    pub liftoff_ms: f32,
    pub fade_ms: f32,
    /// Entries shown in the checklist.
    pub checklist_len: usize,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            first_step_ms: 300.0,
            step_ms: 420.0,
            ignition_ms: 500.0,
            glitch_ms: 300.0,
            liftoff_ms: 900.0,
            fade_ms: 700.0,
            checklist_len: 5,
        }
    }
}

impl CountdownConfig {
    /// Total sequence length in milliseconds.
    pub fn total_ms(&self) -> f32 {
        let later_steps = self.steps.len().saturating_sub(2) as f32;
        let first = if self.steps.len() > 1 { self.first_step_ms } else { 0.0 };
        first + later_steps * self.step_ms + self.ignition_ms + self.liftoff_ms + self.fade_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStage {
    Counting,
    /// Final step shown, waiting for liftoff.
    Ignition,
    Launching,
    Fading,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownSignal {
    Step(u32),
    Liftoff,
    FadeStarted,
    Complete,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    config: CountdownConfig,
    stage: LaunchStage,
    step: u32,
    timer: StageTimer,
    completed: bool,
}

impl Countdown {
    pub fn new(config: CountdownConfig) -> Self {
        let stage = if config.steps.len() <= 1 {
            LaunchStage::Ignition
        } else {
            LaunchStage::Counting
        };
        Self {
            config,
            stage,
            step: 0,
            timer: StageTimer::new(),
            completed: false,
        }
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn stage(&self) -> LaunchStage {
        self.stage
    }

    /// Index of the current step (0 = first label).
    pub fn step(&self) -> u32 {
        self.step
    }

    fn last_step(&self) -> u32 {
        self.config.steps.len().saturating_sub(1) as u32
    }

    pub fn is_done(&self) -> bool {
        self.stage == LaunchStage::Done
    }

    /// Spend `dt_ms` of wall time, pushing every signal raised on the way.
    pub fn advance(&mut self, dt_ms: f32, signals: &mut Vec<CountdownSignal>) {
        let mut remaining = dt_ms.max(0.0);
        loop {
            let deadline = match self.stage {
                LaunchStage::Counting if self.step == 0 => self.config.first_step_ms,
                LaunchStage::Counting => self.config.step_ms,
                LaunchStage::Ignition => self.config.ignition_ms,
                LaunchStage::Launching => self.config.liftoff_ms,
                LaunchStage::Fading => self.config.fade_ms,
                LaunchStage::Done => return,
            };
            if !self.timer.consume(deadline, &mut remaining) {
                return;
            }
            self.timer.reset();
            match self.stage {
                LaunchStage::Counting => {
                    self.step += 1;
                    signals.push(CountdownSignal::Step(self.step));
                    if self.step >= self.last_step() {
                        self.stage = LaunchStage::Ignition;
                        log::debug!("countdown reached final step {}", self.step);
                    }
                }
                LaunchStage::Ignition => {
                    self.stage = LaunchStage::Launching;
                    signals.push(CountdownSignal::Liftoff);
                    log::debug!("liftoff");
                }
                LaunchStage::Launching => {
                    self.stage = LaunchStage::Fading;
                    signals.push(CountdownSignal::FadeStarted);
                }
                LaunchStage::Fading => {
                    self.stage = LaunchStage::Done;
                    if !self.completed {
                        self.completed = true;
                        signals.push(CountdownSignal::Complete);
                        log::debug!("launch sequence complete");
                    }
                }
                LaunchStage::Done => return,
            }
        }
    }

    /// Big number: seconds to go, 0 from ignition on.
    pub fn display_number(&self) -> u32 {
        self.last_step().saturating_sub(self.step)
    }

    /// Step progress in [0, 1].
    pub fn progress(&self) -> f32 {
        let last = self.last_step();
        if last == 0 {
            1.0
        } else {
            (self.step.min(last) as f32 / last as f32).clamp(0.0, 1.0)
        }
    }

    pub fn current(&self) -> Option<&StepLabel> {
        self.config.steps.get(self.step.min(self.last_step()) as usize)
    }

    /// The most recent reached steps, oldest first.
    pub fn checklist(&self) -> &[StepLabel] {
        let steps = &self.config.steps;
        let end = (self.step as usize + 1).min(steps.len());
        let start = end.saturating_sub(self.config.checklist_len);
        &steps[start..end]
    }

    /// Opacity of the whole overlay: 1 until the fade, 0 once done.
    pub fn overlay_opacity(&self) -> f32 {
        match self.stage {
            LaunchStage::Fading => 1.0 - Easing::CubicInOut.apply(self.timer.progress(self.config.fade_ms)),
            LaunchStage::Done => 0.0,
            _ => 1.0,
        }
    }

    pub fn is_glitching(&self) -> bool {
        self.stage == LaunchStage::Launching && self.timer.elapsed_ms() < self.config.glitch_ms
    }

    /// Random jitter for the big number while glitching.
    pub fn glitch_offset(&self, rng: &mut Rng) -> Option<Vec2> {
        self.is_glitching()
            .then(|| Vec2::new(rng.centered(3.0), rng.centered(2.0)))
    }

    /// How far the rocket has dropped away, 0 before liftoff to 1 at the fade.
    pub fn liftoff_progress(&self) -> f32 {
        match self.stage {
            LaunchStage::Counting | LaunchStage::Ignition => 0.0,
            LaunchStage::Launching => Easing::CubicInOut.apply(self.timer.progress(self.config.liftoff_ms)),
            LaunchStage::Fading | LaunchStage::Done => 1.0,
        }
    }

    /// Exhaust runs only between liftoff and the fade.
    pub fn exhaust_active(&self) -> bool {
        self.stage == LaunchStage::Launching
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(CountdownConfig::default())
    }
}
