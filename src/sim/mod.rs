pub mod driver;
pub mod job;
pub mod stats;

pub use driver::Sim;
pub use job::{TaskSpec, random_tasks};
pub use stats::{Averages, EnergyBreakdown, FinishedTask, RunReport, RunStats};
