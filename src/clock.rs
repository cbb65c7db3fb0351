//! Fixed-timestep simulation clock.
//!
//! The clock decouples simulation progress from display refresh: wall time
//! is accumulated per frame and drained in whole timesteps, each worth one
//! model step. The drain always subtracts, even while paused, so the
//! accumulator never carries more than one timestep into the next frame and
//! resuming from pause never replays time spent paused.

use crate::model::TapeModel;

/// Whether the clock executes model steps while draining.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Fixed-timestep accumulator driving the model.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Target ticks per second, in [1, max_rate]
    rate: f64,
    /// Milliseconds per tick, `1000 / rate`
    timestep_ms: f64,
    /// Unconsumed wall time; < timestep after every drain
    accumulator_ms: f64,
    /// Ticks executed so far, monotonic
    elapsed: u64,
    state: RunState,
    max_rate: f64,
}

impl SimClock {
    /// Lower bound for the target rate
    pub const MIN_RATE: f64 = 1.0;

    /// Rate multiplier for one speed-up or slow-down command
    pub const RATE_FACTOR: f64 = 1.3;

    /// Create a running clock at `rate` ticks per second
    pub fn new(rate: f64, max_rate: f64) -> Self {
        let max_rate = max_rate.max(Self::MIN_RATE);
        let rate = rate.clamp(Self::MIN_RATE, max_rate);
        Self {
            rate,
            timestep_ms: 1000.0 / rate,
            accumulator_ms: 0.0,
            elapsed: 0,
            state: RunState::Running,
            max_rate,
        }
    }

    /// Drain `dt_ms` of wall time, stepping the model once per whole
    /// timestep while running. Returns the number of steps executed.
    pub fn advance(&mut self, dt_ms: f64, model: &mut dyn TapeModel) -> u32 {
        self.accumulator_ms += dt_ms;
        let mut executed = 0;
        while self.accumulator_ms >= self.timestep_ms {
            if self.state == RunState::Running {
                model.step();
                self.elapsed += 1;
                executed += 1;
            }
            self.accumulator_ms -= self.timestep_ms;
        }
        executed
    }

    /// Execute exactly one step and leave the clock paused, whatever its
    /// prior state. The accumulator is untouched.
    pub fn single_step(&mut self, model: &mut dyn TapeModel) {
        model.step();
        self.elapsed += 1;
        self.state = RunState::Paused;
    }

    /// Flip between running and paused
    pub fn toggle(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
    }

    /// Multiply the target rate by 1.3, saturating at the maximum.
    /// The accumulator is not reset, so the new timestep applies to
    /// whatever lag is already pending.
    pub fn increase_rate(&mut self) {
        self.set_rate(self.rate * Self::RATE_FACTOR);
    }

    /// Divide the target rate by 1.3, saturating at 1 tick/s
    pub fn decrease_rate(&mut self) {
        self.set_rate(self.rate / Self::RATE_FACTOR);
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(Self::MIN_RATE, self.max_rate);
        self.timestep_ms = 1000.0 / self.rate;
    }

    /// Current target rate in ticks per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// True when the rate sits at the configured maximum
    pub fn is_max_rate(&self) -> bool {
        self.rate >= self.max_rate
    }

    /// Milliseconds per tick
    pub fn timestep_ms(&self) -> f64 {
        self.timestep_ms
    }

    /// Ticks executed since creation
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}
