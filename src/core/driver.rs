use tracing::{debug, trace};

use super::{
    delay::Delay,
    event::{SimEvent, TickRecord},
    observer::Observer,
    power::ProcessorState,
    state::{Millis, Priority, SimCtx, TaskId},
};
use crate::{config::SimConfig, scheduler::SleepPolicy};

pub struct SchedCore<P: SleepPolicy, D: Delay> {
    pub ctx: SimCtx,
    config: SimConfig,
    sleep: P,
    delay: D,
    observer: Observer,
    tick: u64,
    total_energy: f64,
}

impl<P: SleepPolicy, D: Delay> SchedCore<P, D> {
    pub fn new(config: SimConfig, sleep: P, delay: D) -> Self {
        Self {
            ctx: SimCtx::new(),
            config,
            sleep,
            delay,
            observer: Observer::new(),
            tick: 0,
            total_energy: 0.0,
        }
    }

    /// Run one scheduling decision. Returns the events emitted, in order, and
    /// the ids of tasks finalized during this tick.
    pub fn tick(&mut self) -> (Vec<TickRecord>, Vec<TaskId>) {
        self.tick += 1;
        let mut events = Vec::new();
        let mut finished = Vec::new();

        if self.ctx.ready.contains_high() {
            self.dispatch_high(&mut events, &mut finished);
        } else if let Some((task, priority)) = self.ctx.ready.pop_front() {
            debug_assert_eq!(priority, Priority::Low, "HIGH task skipped by the low path");
            self.dispatch_low(task, &mut events, &mut finished);
        } else {
            let duration = self.sleep.min_duration();
            let energy = self.config.power.energy(ProcessorState::Idle, duration);
            debug!(tick = self.tick, duration, "cpu idle");
            self.emit(&mut events, SimEvent::Idle { duration, energy });
            self.elapse(duration);
        }

        self.observer.observe(&self.ctx);
        (events, finished)
    }

    // Every queued HIGH task gets one slice in FIFO order; LOW members are
    // held aside and requeued behind the survivors once the pass is done.
    fn dispatch_high(&mut self, events: &mut Vec<TickRecord>, finished: &mut Vec<TaskId>) {
        let (high, deferred) = self.ctx.ready.drain_partition();
        let slice = self.config.time_slice_high;
        trace!(tick = self.tick, high = high.len(), deferred = deferred.len(), "high pass");

        for task in high {
            let (remaining, consumed, energy) = self.run_slice(task, slice);
            self.emit(
                events,
                SimEvent::Running {
                    task,
                    priority: Priority::High,
                    remaining,
                    energy,
                },
            );
            self.elapse(consumed);
            self.settle(task, events, finished);
        }

        for task in deferred {
            self.ctx.requeue(task);
        }
    }

    fn dispatch_low(
        &mut self,
        task: TaskId,
        events: &mut Vec<TickRecord>,
        finished: &mut Vec<TaskId>,
    ) {
        let slice = self.config.time_slice_low;
        let was_sleeping = self.ctx.task(task).is_sleeping;
        self.ctx.task_mut(task).is_sleeping = false;

        let (remaining, consumed, energy) = self.run_slice(task, slice);
        let event = if was_sleeping {
            SimEvent::Waking {
                task,
                remaining,
                energy,
            }
        } else {
            SimEvent::Running {
                task,
                priority: Priority::Low,
                remaining,
                energy,
            }
        };
        self.emit(events, event);
        self.elapse(consumed);

        if self.ctx.task(task).is_finished() {
            self.finish(task, events, finished);
            return;
        }

        // Mirrors the deferral-buffer check of a HIGH pass. The LOW path only
        // runs when the ready set held no HIGH task, so in practice the task
        // always sleeps here.
        if self.ctx.ready.contains_high() {
            debug!(tick = self.tick, task, "high work pending; not sleeping");
        } else {
            let duration = self.sleep.sleep_duration();
            let energy = self.config.power.energy(ProcessorState::Sleeping, duration);
            self.ctx.mark_sleeping(task);
            self.emit(
                events,
                SimEvent::Sleeping {
                    task,
                    duration,
                    energy,
                },
            );
            self.elapse(duration);
        }
        self.ctx.requeue(task);
    }

    // Returns (remaining before the slice, work consumed, energy charged).
    // The caller elapses `consumed` after recording the dispatch.
    fn run_slice(&mut self, task: TaskId, slice: Millis) -> (Millis, Millis, f64) {
        self.ctx.mark_started(task);
        let remaining = self.ctx.task(task).remaining_time;
        let consumed = self.ctx.task_mut(task).execute(slice);

        let billed = self.config.charge_policy.billed(slice, consumed);
        let energy = self.config.power.energy(ProcessorState::Running, billed);
        debug!(tick = self.tick, task, remaining, consumed, "ran slice");
        (remaining, consumed, energy)
    }

    fn settle(&mut self, task: TaskId, events: &mut Vec<TickRecord>, finished: &mut Vec<TaskId>) {
        if self.ctx.task(task).is_finished() {
            self.finish(task, events, finished);
        } else {
            self.ctx.requeue(task);
        }
    }

    fn finish(&mut self, task: TaskId, events: &mut Vec<TickRecord>, finished: &mut Vec<TaskId>) {
        self.ctx.mark_finished(task);
        let priority = self.ctx.task(task).priority;
        debug!(tick = self.tick, task, now = self.ctx.now, "task finished");
        self.emit(events, SimEvent::Finished { task, priority });
        finished.push(task);
    }

    fn emit(&mut self, events: &mut Vec<TickRecord>, event: SimEvent) {
        self.total_energy += event.energy();
        events.push(TickRecord {
            tick: self.tick,
            time: self.ctx.now,
            event,
        });
    }

    fn elapse(&mut self, duration: Millis) {
        self.ctx.advance_time(duration);
        self.delay.wait(duration);
    }

    pub fn has_pending_work(&self) -> bool {
        !self.ctx.ready.is_empty()
    }

    pub fn now(&self) -> Millis {
        self.ctx.now
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SimConfig,
        core::{EventKind, NoDelay},
        scheduler::UniformSleep,
    };

    fn new_core(config: SimConfig) -> SchedCore<UniformSleep, NoDelay> {
        let sleep =
            UniformSleep::seeded(config.sleep_duration_min, config.sleep_duration_max, 1);
        SchedCore::new(config, sleep, NoDelay)
    }

    #[test]
    fn test_high_pass_defers_low_behind_high() {
        let mut core = new_core(SimConfig::builder().time_slice_high(10).build().unwrap());
        let low = core.ctx.create_task(Priority::Low, 100);
        let high = core.ctx.create_task(Priority::High, 100);

        let (events, finished) = core.tick();
        assert!(finished.is_empty());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.task(), Some(high));
        assert_eq!(core.ctx.ready.iter().collect::<Vec<_>>(), vec![high, low]);
        assert_eq!(core.ctx.task(low).remaining_time, 100);
        assert_eq!(core.ctx.task(low).start_time, None);
    }

    #[test]
    fn test_low_sleeps_then_wakes() {
        let config = SimConfig::builder()
            .time_slice_low(10)
            .sleep_range(5, 6)
            .build()
            .unwrap();
        let mut core = new_core(config);
        let low = core.ctx.create_task(Priority::Low, 30);

        let (events, _) = core.tick();
        let kinds: Vec<_> = events.iter().map(|r| r.event.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Running, EventKind::Sleeping]);
        assert!(core.ctx.task(low).is_sleeping);

        let (events, _) = core.tick();
        assert_eq!(events[0].event.kind(), EventKind::Waking);
        assert_eq!(events[0].event.remaining(), Some(20));
        assert_eq!(core.ctx.task(low).remaining_time, 10);
    }

    #[test]
    fn test_low_skips_sleep_while_high_is_queued() {
        let mut core = new_core(SimConfig::builder().time_slice_low(10).build().unwrap());
        let low = core.ctx.create_task(Priority::Low, 30);
        let high = core.ctx.create_task(Priority::High, 30);

        let (popped, _) = core.ctx.ready.pop_front().unwrap();
        assert_eq!(popped, low);
        let mut events = Vec::new();
        let mut finished = Vec::new();
        core.dispatch_low(low, &mut events, &mut finished);

        let kinds: Vec<_> = events.iter().map(|r| r.event.kind()).collect();
        assert_eq!(kinds, vec![EventKind::Running]);
        assert!(!core.ctx.task(low).is_sleeping);
        assert_eq!(core.ctx.task(low).remaining_time, 20);
        assert_eq!(core.ctx.ready.iter().collect::<Vec<_>>(), vec![high, low]);
        assert_eq!(core.now(), 10);
    }

    #[test]
    fn test_idle_tick_on_empty_ready_set() {
        let config = SimConfig::builder()
            .sleep_range(20, 40)
            .idle_power(0.5)
            .build()
            .unwrap();
        let mut core = new_core(config);

        let (events, finished) = core.tick();
        assert!(finished.is_empty());
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event,
            SimEvent::Idle {
                duration: 20,
                energy: 0.5 * (20.0 / 1000.0)
            }
        );
        assert_eq!(core.now(), 20);
    }

    #[test]
    fn test_finished_event_follows_final_slice() {
        let mut core = new_core(SimConfig::builder().time_slice_high(50).build().unwrap());
        let high = core.ctx.create_task(Priority::High, 30);

        let (events, finished) = core.tick();
        assert_eq!(finished, vec![high]);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event, SimEvent::Finished { task: high, priority: Priority::High });
        assert_eq!(events[1].time, 30);
        assert_eq!(core.ctx.task(high).finish_time, Some(30));
        assert!(!core.has_pending_work());
    }
}
