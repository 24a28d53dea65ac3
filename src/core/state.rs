use rustc_hash::FxHashSet;
use std::collections::VecDeque;

// 1-based, assigned in input order
pub type TaskId = u32;
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    // Only LOW tasks ever sleep
    Sleeping,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub priority: Priority,
    pub burst_time: Millis,
    pub remaining_time: Millis,
    pub is_sleeping: bool,
    pub arrival_time: Millis,
    pub start_time: Option<Millis>,
    pub finish_time: Option<Millis>,
}

impl Task {
    pub fn new(id: TaskId, priority: Priority, burst_time: Millis, arrival_time: Millis) -> Self {
        debug_assert!(burst_time > 0, "Task {id} must carry work");
        Self {
            id,
            priority,
            burst_time,
            remaining_time: burst_time,
            is_sleeping: false,
            arrival_time,
            start_time: None,
            finish_time: None,
        }
    }

    pub fn state(&self) -> TaskState {
        if self.finish_time.is_some() {
            TaskState::Finished
        } else if self.is_sleeping {
            TaskState::Sleeping
        } else {
            TaskState::Ready
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Consume up to `slice` ms of remaining work, returning the amount consumed.
    pub fn execute(&mut self, slice: Millis) -> Millis {
        let consumed = self.remaining_time.min(slice);
        self.remaining_time -= consumed;
        consumed
    }
}

/// FIFO of not-yet-finished tasks. The priority of each member is cached next
/// to its id so the "any HIGH present" query needs no task table lookup.
#[derive(Debug, Default)]
pub struct ReadySet {
    queue: VecDeque<(TaskId, Priority)>,
    members: FxHashSet<TaskId>,
}

impl ReadySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, task: TaskId, priority: Priority) {
        let inserted = self.members.insert(task);
        assert!(inserted, "Task {task} already present in the ready set");
        self.queue.push_back((task, priority));
    }

    pub fn pop_front(&mut self) -> Option<(TaskId, Priority)> {
        let entry = self.queue.pop_front()?;
        let removed = self.members.remove(&entry.0);
        debug_assert!(removed, "Task {} missing ready-set membership", entry.0);
        Some(entry)
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.members.contains(&task)
    }

    pub fn contains_high(&self) -> bool {
        self.queue.iter().any(|(_, p)| *p == Priority::High)
    }

    /// Empty the set in one pass, splitting it into (HIGH, LOW) members with
    /// their relative FIFO order preserved.
    pub fn drain_partition(&mut self) -> (Vec<TaskId>, Vec<TaskId>) {
        self.members.clear();
        let mut high = Vec::new();
        let mut low = Vec::new();
        for (task, priority) in self.queue.drain(..) {
            match priority {
                Priority::High => high.push(task),
                Priority::Low => low.push(task),
            }
        }
        (high, low)
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.queue.iter().map(|(task, _)| *task)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Millis,
    pub tasks: Vec<Task>,
    pub ready: ReadySet,
}

impl SimCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            tasks: Vec::new(),
            ready: ReadySet::new(),
        }
    }

    /// Create a task arriving now and append it to the ready set.
    pub fn create_task(&mut self, priority: Priority, burst_time: Millis) -> TaskId {
        let id = self.tasks.len() as TaskId + 1;
        self.tasks.push(Task::new(id, priority, burst_time, self.now));
        self.ready.push_back(id, priority);
        id
    }

    pub fn advance_time(&mut self, delta: Millis) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[Self::index(task_id)]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[Self::index(task_id)]
    }

    fn index(task_id: TaskId) -> usize {
        debug_assert!(task_id > 0, "TaskId 0 is never assigned");
        (task_id - 1) as usize
    }

    pub fn requeue(&mut self, task_id: TaskId) {
        let task = self.task(task_id);
        debug_assert!(
            task.state() != TaskState::Finished,
            "Finished task {task_id} cannot be requeued"
        );
        let priority = task.priority;
        self.ready.push_back(task_id, priority);
    }

    pub fn mark_started(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        if task.start_time.is_none() {
            task.start_time = Some(now);
        }
    }

    pub fn mark_sleeping(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.priority,
            Priority::Low,
            "Only LOW task may sleep, got task {task_id}"
        );
        task.is_sleeping = true;
    }

    pub fn mark_finished(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.ready.contains(task_id),
            "Finishing task {task_id} that is still enqueued"
        );

        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(task.is_finished(), "Task {task_id} still has work left");
        debug_assert!(
            task.finish_time.is_none(),
            "Task {task_id} finished twice"
        );

        task.is_sleeping = false;
        task.finish_time = Some(now);
    }
}

impl Default for SimCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_clamps_to_remaining() {
        let mut task = Task::new(1, Priority::Low, 10, 0);
        assert_eq!(task.execute(20), 10);
        assert_eq!(task.remaining_time, 0);
        assert!(task.is_finished());
        assert_eq!(task.execute(20), 0);
    }

    #[test]
    fn test_ready_set_partition_keeps_fifo() {
        let mut ready = ReadySet::new();
        ready.push_back(1, Priority::Low);
        ready.push_back(2, Priority::High);
        ready.push_back(3, Priority::Low);
        ready.push_back(4, Priority::High);
        assert!(ready.contains_high());

        let (high, low) = ready.drain_partition();
        assert_eq!(high, vec![2, 4]);
        assert_eq!(low, vec![1, 3]);
        assert!(ready.is_empty());
        assert!(!ready.contains(2));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn test_ready_set_rejects_duplicates() {
        let mut ready = ReadySet::new();
        ready.push_back(1, Priority::High);
        ready.push_back(1, Priority::High);
    }

    #[test]
    fn test_start_time_set_once() {
        let mut ctx = SimCtx::new();
        let id = ctx.create_task(Priority::High, 100);
        ctx.advance_time(5);
        ctx.mark_started(id);
        ctx.advance_time(5);
        ctx.mark_started(id);
        assert_eq!(ctx.task(id).start_time, Some(5));
        assert_eq!(ctx.task(id).arrival_time, 0);
    }

    #[test]
    fn test_task_state_transitions() {
        let mut ctx = SimCtx::new();
        let id = ctx.create_task(Priority::Low, 10);
        assert_eq!(ctx.task(id).state(), TaskState::Ready);

        ctx.mark_sleeping(id);
        assert_eq!(ctx.task(id).state(), TaskState::Sleeping);

        ctx.ready.pop_front();
        ctx.task_mut(id).execute(10);
        ctx.mark_finished(id);
        assert_eq!(ctx.task(id).state(), TaskState::Finished);
    }
}
