use super::state::{Priority, SimCtx, TaskState};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;
        tracing::trace!(step = self.step, ready = ctx.ready.len(), now = ctx.now, "observe");

        for task in &ctx.tasks {
            debug_assert!(
                task.remaining_time <= task.burst_time,
                "Task {} remaining {} exceeds burst {}",
                task.id,
                task.remaining_time,
                task.burst_time
            );
            if let Some(start) = task.start_time {
                debug_assert!(
                    task.arrival_time <= start,
                    "Task {} started before it arrived",
                    task.id
                );
            }

            match task.state() {
                TaskState::Finished => {
                    debug_assert_eq!(task.remaining_time, 0, "Finished task {} has work", task.id);
                    debug_assert!(
                        task.start_time <= task.finish_time,
                        "Task {} finished before it started",
                        task.id
                    );
                    debug_assert!(
                        !ctx.ready.contains(task.id),
                        "Finished task {} still present in ready set",
                        task.id
                    );
                }
                TaskState::Sleeping => {
                    debug_assert_eq!(
                        task.priority,
                        Priority::Low,
                        "HIGH task {} is sleeping",
                        task.id
                    );
                    debug_assert!(ctx.ready.contains(task.id), "Sleeping task {} lost", task.id);
                }
                TaskState::Ready => {
                    debug_assert!(
                        ctx.ready.contains(task.id),
                        "Unfinished task {} missing from ready set",
                        task.id
                    );
                }
            }
        }

        debug_assert_eq!(
            ctx.ready.len(),
            ctx.tasks.iter().filter(|t| t.state() != TaskState::Finished).count(),
            "Ready set size disagrees with unfinished task count"
        );
    }
}
