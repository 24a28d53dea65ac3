pub mod config;
pub mod core;
pub mod error;
pub mod prompt;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use crate::core::{Priority, SimEvent, TickRecord};
pub use error::{Error, Result};
pub use scheduler::SleepPolicy;
pub use sim::{RunReport, Sim, TaskSpec};
