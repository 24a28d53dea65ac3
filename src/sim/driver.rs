use rand::rngs::StdRng;
use tracing::info;

use super::{
    job::{TaskSpec, validate_tasks},
    stats::{EnergyBreakdown, FinishedTask, RunReport, RunStats},
};
use crate::{
    config::SimConfig,
    core::{Delay, NoDelay, SchedCore, TickRecord},
    error::Result,
    scheduler::{SleepPolicy, UniformSleep},
};

pub struct Sim<P: SleepPolicy = UniformSleep<StdRng>, D: Delay = NoDelay> {
    pub core: SchedCore<P, D>,
    pub events: Vec<TickRecord>,
    stats: RunStats,
    energy_by_state: EnergyBreakdown,
}

impl Sim {
    /// Validated simulation with a seeded sleep generator and no real-time pacing.
    pub fn new(config: SimConfig, tasks: &[TaskSpec], seed: u64) -> Result<Self> {
        config.validate()?;
        let sleep =
            UniformSleep::seeded(config.sleep_duration_min, config.sleep_duration_max, seed);
        Self::with_parts(config, tasks, sleep, NoDelay)
    }
}

impl<P: SleepPolicy, D: Delay> Sim<P, D> {
    /// Build from explicit parts. `config` is taken as already validated; only
    /// the task list is checked here.
    pub fn with_parts(config: SimConfig, tasks: &[TaskSpec], sleep: P, delay: D) -> Result<Self> {
        validate_tasks(tasks)?;

        let mut core = SchedCore::new(config, sleep, delay);
        for spec in tasks {
            core.ctx.create_task(spec.priority, spec.burst_time);
        }
        info!(tasks = tasks.len(), "simulation ready");

        Ok(Self {
            core,
            events: Vec::new(),
            stats: RunStats::new(),
            energy_by_state: EnergyBreakdown::default(),
        })
    }

    /// Advance one tick and return the events it produced.
    pub fn step(&mut self) -> &[TickRecord] {
        let (events, finished) = self.core.tick();

        for task in finished {
            let snapshot = FinishedTask::from_task(self.core.ctx.task(task));
            debug_assert!(snapshot.is_some(), "Finished task {task} missing timestamps");
            if let Some(snapshot) = snapshot {
                self.stats.record(snapshot);
            }
        }
        for record in &events {
            if let Some(state) = record.event.processor_state() {
                self.energy_by_state.add(state, record.event.energy());
            }
        }

        let first = self.events.len();
        self.events.extend(events);
        &self.events[first..]
    }

    pub fn all_tasks_finished(&self) -> bool {
        !self.core.has_pending_work()
    }

    /// Run until every task has finished. `on_tick` sees each tick's events
    /// as they are produced.
    pub fn run_with<F: FnMut(&[TickRecord])>(mut self, mut on_tick: F) -> RunReport {
        while !self.all_tasks_finished() {
            on_tick(self.step());
        }
        self.into_report()
    }

    pub fn run(self) -> RunReport {
        self.run_with(|_| {})
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn into_report(self) -> RunReport {
        info!(
            ticks = self.core.ticks(),
            elapsed = self.core.now(),
            energy = self.core.total_energy(),
            "simulation complete"
        );
        RunReport {
            averages: self.stats.averages(),
            stats: self.stats,
            total_energy: self.core.total_energy(),
            energy_by_state: self.energy_by_state,
            ticks: self.core.ticks(),
            elapsed: self.core.now(),
        }
    }
}
