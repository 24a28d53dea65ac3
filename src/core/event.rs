use crate::core::{Millis, Priority, ProcessorState, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    // `remaining` is the work left before this dispatch
    Running {
        task: TaskId,
        priority: Priority,
        remaining: Millis,
        energy: f64,
    },
    // A sleeping LOW task resumed and ran one slice
    Waking {
        task: TaskId,
        remaining: Millis,
        energy: f64,
    },
    Sleeping {
        task: TaskId,
        duration: Millis,
        energy: f64,
    },
    // Ready set empty
    Idle {
        duration: Millis,
        energy: f64,
    },
    Finished {
        task: TaskId,
        priority: Priority,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Running,
    Waking,
    Sleeping,
    Idle,
    Finished,
}

impl SimEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimEvent::Running { .. } => EventKind::Running,
            SimEvent::Waking { .. } => EventKind::Waking,
            SimEvent::Sleeping { .. } => EventKind::Sleeping,
            SimEvent::Idle { .. } => EventKind::Idle,
            SimEvent::Finished { .. } => EventKind::Finished,
        }
    }

    pub fn task(&self) -> Option<TaskId> {
        match *self {
            SimEvent::Running { task, .. }
            | SimEvent::Waking { task, .. }
            | SimEvent::Sleeping { task, .. }
            | SimEvent::Finished { task, .. } => Some(task),
            SimEvent::Idle { .. } => None,
        }
    }

    pub fn remaining(&self) -> Option<Millis> {
        match *self {
            SimEvent::Running { remaining, .. } | SimEvent::Waking { remaining, .. } => {
                Some(remaining)
            }
            _ => None,
        }
    }

    pub fn energy(&self) -> f64 {
        match *self {
            SimEvent::Running { energy, .. }
            | SimEvent::Waking { energy, .. }
            | SimEvent::Sleeping { energy, .. }
            | SimEvent::Idle { energy, .. } => energy,
            SimEvent::Finished { .. } => 0.0,
        }
    }

    /// Processor state the event's energy was charged against.
    pub fn processor_state(&self) -> Option<ProcessorState> {
        match self {
            SimEvent::Running { .. } | SimEvent::Waking { .. } => Some(ProcessorState::Running),
            SimEvent::Sleeping { .. } => Some(ProcessorState::Sleeping),
            SimEvent::Idle { .. } => Some(ProcessorState::Idle),
            SimEvent::Finished { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub tick: u64,
    // Simulated time at which the event was emitted
    pub time: Millis,
    pub event: SimEvent,
}
