//! Finished-task bookkeeping and the end-of-run aggregates.

use average::Max;

use crate::core::{Millis, Priority, ProcessorState, Task, TaskId};

/// Snapshot of a task taken when it was finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedTask {
    pub id: TaskId,
    pub priority: Priority,
    pub burst_time: Millis,
    pub arrival_time: Millis,
    pub start_time: Millis,
    pub finish_time: Millis,
}

impl FinishedTask {
    /// Returns `None` for a task that was never finalized.
    pub fn from_task(task: &Task) -> Option<Self> {
        Some(Self {
            id: task.id,
            priority: task.priority,
            burst_time: task.burst_time,
            arrival_time: task.arrival_time,
            start_time: task.start_time?,
            finish_time: task.finish_time?,
        })
    }

    pub fn turnaround(&self) -> Millis {
        self.finish_time - self.arrival_time
    }

    pub fn waiting(&self) -> Millis {
        self.start_time - self.arrival_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Averages {
    NoTasks,
    Mean {
        turnaround: f64,
        waiting: f64,
        longest_wait: f64,
    },
}

#[derive(Debug, Default, Clone)]
pub struct RunStats {
    finished: Vec<FinishedTask>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, task: FinishedTask) {
        debug_assert!(
            self.finished.iter().all(|t| t.id != task.id),
            "Task {} recorded twice",
            task.id
        );
        self.finished.push(task);
    }

    pub fn finished(&self) -> &[FinishedTask] {
        &self.finished
    }

    pub fn len(&self) -> usize {
        self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finished.is_empty()
    }

    pub fn averages(&self) -> Averages {
        if self.finished.is_empty() {
            return Averages::NoTasks;
        }

        // Plain sum / N: an incremental mean drifts by a few ulps
        let n = self.finished.len() as f64;
        let mut turnaround = 0.0;
        let mut waiting = 0.0;
        for task in &self.finished {
            turnaround += task.turnaround() as f64;
            waiting += task.waiting() as f64;
        }
        let longest: Max = self.finished.iter().map(|t| t.waiting() as f64).collect();

        Averages::Mean {
            turnaround: turnaround / n,
            waiting: waiting / n,
            longest_wait: longest.max(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyBreakdown {
    pub running: f64,
    pub sleeping: f64,
    pub idle: f64,
}

impl EnergyBreakdown {
    pub fn add(&mut self, state: ProcessorState, energy: f64) {
        match state {
            ProcessorState::Running => self.running += energy,
            ProcessorState::Sleeping => self.sleeping += energy,
            ProcessorState::Idle => self.idle += energy,
        }
    }
}

/// Everything the reporting layer needs once the loop has terminated.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    pub averages: Averages,
    pub total_energy: f64,
    pub energy_by_state: EnergyBreakdown,
    pub ticks: u64,
    pub elapsed: Millis,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: TaskId, start: Millis, finish: Millis) -> FinishedTask {
        FinishedTask {
            id,
            priority: Priority::Low,
            burst_time: 10,
            arrival_time: 0,
            start_time: start,
            finish_time: finish,
        }
    }

    #[test]
    fn test_empty_stats_report_no_tasks() {
        assert_eq!(RunStats::new().averages(), Averages::NoTasks);
    }

    #[test]
    fn test_averages() {
        let mut stats = RunStats::new();
        stats.record(finished(1, 0, 100));
        stats.record(finished(2, 50, 150));
        stats.record(finished(3, 100, 200));

        match stats.averages() {
            Averages::Mean {
                turnaround,
                waiting,
                longest_wait,
            } => {
                assert_eq!(turnaround, 150.0);
                assert_eq!(waiting, 50.0);
                assert_eq!(longest_wait, 100.0);
            }
            Averages::NoTasks => panic!("expected averages"),
        }
    }

    #[test]
    fn test_averages_match_sum_over_count() {
        let mut stats = RunStats::new();
        let finishes = [7, 13, 29, 31, 101, 257, 263, 1009, 4099];
        for (i, finish) in finishes.iter().enumerate() {
            stats.record(finished(i as TaskId + 1, finish / 3, *finish));
        }

        let n = finishes.len() as f64;
        let turnaround_sum: f64 = stats.finished().iter().map(|t| t.turnaround() as f64).sum();
        let waiting_sum: f64 = stats.finished().iter().map(|t| t.waiting() as f64).sum();
        match stats.averages() {
            Averages::Mean {
                turnaround,
                waiting,
                ..
            } => {
                assert_eq!(turnaround, turnaround_sum / n);
                assert_eq!(waiting, waiting_sum / n);
            }
            Averages::NoTasks => panic!("expected averages"),
        }
    }

    #[test]
    fn test_unfinished_task_has_no_snapshot() {
        let task = Task::new(1, Priority::High, 10, 0);
        assert!(FinishedTask::from_task(&task).is_none());
    }

    #[test]
    fn test_energy_breakdown() {
        let mut breakdown = EnergyBreakdown::default();
        breakdown.add(ProcessorState::Running, 0.25);
        breakdown.add(ProcessorState::Running, 0.25);
        breakdown.add(ProcessorState::Idle, 0.125);
        assert_eq!(breakdown.running, 0.5);
        assert_eq!(breakdown.sleeping, 0.0);
        assert_eq!(breakdown.idle, 0.125);
    }
}
