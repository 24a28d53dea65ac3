//! Console rendering of the tick trace and the end-of-run summary.

use std::io::{self, Write};

use crate::{
    core::{SimEvent, TickRecord},
    sim::{Averages, RunReport},
};

const RULE: &str = "-------------------------------------------------------";
const BANNER: &str = "=======================================================";

pub fn write_trace_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "      Power-Aware Scheduling Simulation - Start      ")?;
    writeln!(out, "{BANNER}")?;
    writeln!(
        out,
        "  Time  |  CPU State  |  Task Info (ID, Priority, Remaining) | Power Consumed"
    )?;
    writeln!(out, "{RULE}")
}

pub fn write_trace<W: Write>(out: &mut W, records: &[TickRecord]) -> io::Result<()> {
    for record in records {
        write_record(out, record)?;
    }
    Ok(())
}

pub fn write_record<W: Write>(out: &mut W, record: &TickRecord) -> io::Result<()> {
    let tick = record.tick;
    match record.event {
        SimEvent::Running {
            task,
            priority,
            remaining,
            energy,
        } => writeln!(
            out,
            "{tick:>6}  |  Running    |  Task {task} ({}, {remaining:>4}ms)        | {energy:.4}",
            priority.label()
        ),
        SimEvent::Waking {
            task,
            remaining,
            energy,
        } => writeln!(
            out,
            "{tick:>6}  |  Waking Up  |  Task {task} (LOW, {remaining:>4}ms)        | {energy:.4}"
        ),
        SimEvent::Sleeping {
            task,
            duration,
            energy,
        } => writeln!(
            out,
            "{tick:>6}  |  Sleeping   |  Task {task} (LOW) for {duration:>4}ms     | {energy:.4}"
        ),
        SimEvent::Idle { energy, .. } => writeln!(
            out,
            "{tick:>6}  |  Idle       |  ---                             | {energy:.4}"
        ),
        SimEvent::Finished { task, priority } => writeln!(
            out,
            "{tick:>6}  |  Finished   |  Task {task} ({:<4})                 |  ---",
            priority.label()
        ),
    }
}

pub fn write_summary<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "                    Simulation End                     ")?;
    writeln!(out, "{BANNER}")?;

    writeln!(out, "\nTask Execution Summary:")?;
    writeln!(out, "-----------------------------------------")?;
    writeln!(
        out,
        "Task ID | Priority | Burst Time | Turnaround Time | Waiting Time"
    )?;
    writeln!(out, "-----------------------------------------")?;
    for task in report.stats.finished() {
        writeln!(
            out,
            "{:>7} | {:>8} | {:>10}ms | {:>15}ms | {:>12}ms",
            task.id,
            task.priority.label(),
            task.burst_time,
            task.turnaround(),
            task.waiting()
        )?;
    }
    writeln!(out, "-----------------------------------------")?;

    match report.averages {
        Averages::Mean {
            turnaround,
            waiting,
            longest_wait,
        } => {
            writeln!(out, "\nAverage Turnaround Time: {turnaround:.2}ms")?;
            writeln!(out, "Average Waiting Time: {waiting:.2}ms")?;
            writeln!(out, "Longest Waiting Time: {longest_wait:.2}ms")?;
        }
        Averages::NoTasks => writeln!(out, "No tasks were executed.")?,
    }

    let by_state = &report.energy_by_state;
    writeln!(out, "\nPower Consumption Summary:")?;
    writeln!(out, "--------------------------")?;
    writeln!(out, "  Running:  {:.4} units", by_state.running)?;
    writeln!(out, "  Sleeping: {:.4} units", by_state.sleeping)?;
    writeln!(out, "  Idle:     {:.4} units", by_state.idle)?;
    writeln!(out, "Total Power Consumed: {:.4} units", report.total_energy)?;
    writeln!(
        out,
        "Simulated time: {}ms over {} ticks",
        report.elapsed, report.ticks
    )
}
