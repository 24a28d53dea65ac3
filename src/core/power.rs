use super::state::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorState {
    Running,
    Sleeping,
    Idle,
}

/// How a dispatch's running energy is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePolicy {
    /// The full configured slice, even when the task needed less.
    #[default]
    ConfiguredSlice,
    /// Only the work actually consumed, `min(slice, remaining)`.
    ConsumedTime,
}

impl ChargePolicy {
    pub fn billed(self, slice: Millis, consumed: Millis) -> Millis {
        match self {
            ChargePolicy::ConfiguredSlice => slice,
            ChargePolicy::ConsumedTime => consumed,
        }
    }
}

/// Per-state power coefficients, in energy units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerModel {
    pub running: f64,
    pub sleeping: f64,
    pub idle: f64,
}

impl PowerModel {
    pub fn new(running: f64, sleeping: f64, idle: f64) -> Self {
        Self {
            running,
            sleeping,
            idle,
        }
    }

    pub fn coefficient(&self, state: ProcessorState) -> f64 {
        match state {
            ProcessorState::Running => self.running,
            ProcessorState::Sleeping => self.sleeping,
            ProcessorState::Idle => self.idle,
        }
    }

    pub fn energy(&self, state: ProcessorState, duration: Millis) -> f64 {
        self.coefficient(state) * (duration as f64 / 1000.0)
    }
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            running: 2.0,
            sleeping: 0.5,
            idle: 0.2,
        }
    }
}
