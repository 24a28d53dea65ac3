//! Interactive setup dialog. Every answer is re-asked until it parses and
//! passes its range check, so the returned config is always valid.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{
    config::SimConfig,
    core::{Millis, Priority},
    error::{Error, Result},
    sim::TaskSpec,
};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` until the answer parses as `T` and satisfies `valid`.
    pub fn ask<T, F>(&mut self, question: &str, retry: &str, valid: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::UnexpectedEof);
            }
            match line.trim().parse::<T>() {
                Ok(value) if valid(&value) => return Ok(value),
                _ => {
                    tracing::debug!(answer = line.trim(), "rejected input");
                    write!(self.output, "Invalid input. {retry}")?;
                    self.output.flush()?;
                }
            }
        }
    }

    pub fn collect(&mut self) -> Result<(SimConfig, Vec<TaskSpec>)> {
        writeln!(self.output, "=======================================================")?;
        writeln!(self.output, "      Power-Aware Scheduling Simulation - Setup      ")?;
        writeln!(self.output, "=======================================================")?;

        let num_tasks: usize = self.ask(
            "Enter the number of tasks: ",
            "Please enter a positive integer for the number of tasks: ",
            |n| *n > 0,
        )?;
        let time_slice_high: Millis = self.ask(
            "Enter time slice for HIGH priority tasks (ms): ",
            "Please enter a positive integer for time slice: ",
            |n| *n > 0,
        )?;
        let time_slice_low: Millis = self.ask(
            "Enter time slice for LOW priority tasks (ms): ",
            "Please enter a positive integer for time slice: ",
            |n| *n > 0,
        )?;
        let sleep_min: Millis = self.ask(
            "Enter minimum sleep duration (ms): ",
            "Please enter a positive integer for sleep duration: ",
            |n| *n > 0,
        )?;
        let sleep_max: Millis = self.ask(
            "Enter maximum sleep duration (ms): ",
            "Please enter an integer greater than minimum sleep duration: ",
            |n: &Millis| *n > sleep_min,
        )?;
        let running: f64 = self.ask(
            "Enter running power consumption (arbitrary units): ",
            "Please enter a positive value for running power: ",
            |p: &f64| p.is_finite() && *p > 0.0,
        )?;
        let sleeping: f64 = self.ask(
            "Enter sleeping power consumption (arbitrary units): ",
            "Please enter a positive value less than running power: ",
            |p: &f64| *p > 0.0 && *p < running,
        )?;
        let idle: f64 = self.ask(
            "Enter idle power consumption (arbitrary units): ",
            "Please enter a positive value less than running power: ",
            |p: &f64| *p > 0.0 && *p < running,
        )?;

        let config = SimConfig::builder()
            .time_slice_high(time_slice_high)
            .time_slice_low(time_slice_low)
            .sleep_range(sleep_min, sleep_max)
            .running_power(running)
            .sleeping_power(sleeping)
            .idle_power(idle)
            .build()?;

        let mut tasks = Vec::with_capacity(num_tasks);
        for i in 1..=num_tasks {
            writeln!(self.output, "\nEnter details for Task {i}:")?;
            let burst_time: Millis = self.ask(
                "  Burst Time (ms): ",
                "Please enter a positive integer for burst time: ",
                |n| *n > 0,
            )?;
            let choice: u8 = self.ask(
                "  Priority (0 for HIGH, 1 for LOW): ",
                "Please enter 0 for HIGH or 1 for LOW priority: ",
                |n: &u8| *n <= 1,
            )?;
            let priority = if choice == 0 {
                Priority::High
            } else {
                Priority::Low
            };
            tasks.push(TaskSpec {
                burst_time,
                priority,
            });
        }

        Ok((config, tasks))
    }
}
