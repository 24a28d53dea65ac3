use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{ops::RangeInclusive, str::FromStr};

use crate::{
    core::{Millis, Priority},
    error::{Error, Result},
};

/// One entry of the input task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub burst_time: Millis,
    pub priority: Priority,
}

impl TaskSpec {
    pub fn high(burst_time: Millis) -> Self {
        Self {
            burst_time,
            priority: Priority::High,
        }
    }

    pub fn low(burst_time: Millis) -> Self {
        Self {
            burst_time,
            priority: Priority::Low,
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" | "0" => Ok(Priority::High),
            "low" | "l" | "1" => Ok(Priority::Low),
            other => Err(Error::parse(format!("unknown priority `{other}`"))),
        }
    }
}

// `BURST:PRIORITY`, e.g. `120:high`
impl FromStr for TaskSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (burst, priority) = s
            .split_once(':')
            .ok_or_else(|| Error::parse(format!("expected BURST:PRIORITY, got `{s}`")))?;
        let burst_time = burst
            .trim()
            .parse::<Millis>()
            .map_err(|e| Error::parse(format!("burst time `{burst}`: {e}")))?;
        Ok(Self {
            burst_time,
            priority: priority.parse()?,
        })
    }
}

pub fn validate_tasks(tasks: &[TaskSpec]) -> Result<()> {
    if tasks.is_empty() {
        return Err(Error::NoTasks);
    }
    for (index, spec) in tasks.iter().enumerate() {
        if spec.burst_time == 0 {
            return Err(Error::invalid_task(index + 1, "burst time must be > 0"));
        }
    }
    Ok(())
}

/// `count` tasks with burst times drawn from `burst` and HIGH priority with
/// probability `p_high`.
pub fn random_tasks(
    count: usize,
    burst: RangeInclusive<Millis>,
    p_high: f64,
    seed: u64,
) -> Vec<TaskSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let burst_time = rng.random_range(burst.clone()).max(1);
            let priority = if rng.random::<f64>() < p_high {
                Priority::High
            } else {
                Priority::Low
            };
            TaskSpec {
                burst_time,
                priority,
            }
        })
        .collect()
}
