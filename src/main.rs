use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use pas_model::{
    Sim, SimConfig, TaskSpec,
    core::{ChargePolicy, Delay, NoDelay, ThreadSleep},
    prompt::Prompter,
    report,
    scheduler::UniformSleep,
    sim::random_tasks,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Charge {
    /// Bill the full configured slice
    Slice,
    /// Bill only the work consumed
    Consumed,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Power-aware two-class scheduling simulation")]
struct Args {
    /// Time slice for HIGH priority tasks (ms)
    #[arg(long, default_value_t = 50)]
    slice_high: u64,

    /// Time slice for LOW priority tasks (ms)
    #[arg(long, default_value_t = 50)]
    slice_low: u64,

    /// Minimum sleep duration (ms); also the length of an idle tick
    #[arg(long, default_value_t = 10)]
    sleep_min: u64,

    /// Maximum sleep duration (ms)
    #[arg(long, default_value_t = 50)]
    sleep_max: u64,

    #[arg(long, default_value_t = 2.0)]
    running_power: f64,

    #[arg(long, default_value_t = 0.5)]
    sleeping_power: f64,

    #[arg(long, default_value_t = 0.2)]
    idle_power: f64,

    #[arg(long, value_enum, default_value_t = Charge::Slice)]
    charge: Charge,

    /// Task as BURST:PRIORITY (e.g. 120:high), repeatable
    #[arg(long = "task", value_parser = parse_task)]
    tasks: Vec<TaskSpec>,

    /// Generate this many random tasks instead of listing them
    #[arg(long)]
    random_tasks: Option<usize>,

    /// Seed for sleep durations and random tasks; OS entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Block for the simulated durations while running
    #[arg(long)]
    realtime: bool,

    /// Real-time multiplier applied with --realtime
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Ask for every parameter on stdin
    #[arg(long)]
    interactive: bool,

    /// Print only the summary
    #[arg(long)]
    quiet: bool,
}

fn parse_task(s: &str) -> std::result::Result<TaskSpec, String> {
    s.parse().map_err(|e: pas_model::Error| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let (config, tasks) = if wants_prompt(&args)? {
        let stdin = io::stdin();
        Prompter::new(stdin.lock(), io::stdout())
            .collect()
            .context("interactive setup failed")?
    } else {
        (config_from_args(&args)?, tasks_from_args(&args)?)
    };

    let delay: Box<dyn Delay> = if args.realtime {
        Box::new(ThreadSleep::new(args.time_scale).context("--time-scale")?)
    } else {
        Box::new(NoDelay)
    };
    let sleep = match args.seed {
        Some(seed) => {
            UniformSleep::seeded(config.sleep_duration_min, config.sleep_duration_max, seed)
        }
        None => UniformSleep::from_entropy(config.sleep_duration_min, config.sleep_duration_max),
    };
    let sim = Sim::with_parts(config, &tasks, sleep, delay)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.quiet {
        report::write_trace_header(&mut out)?;
    }

    let mut write_err = None;
    let report = sim.run_with(|records| {
        if args.quiet || write_err.is_some() {
            return;
        }
        if let Err(e) = report::write_trace(&mut out, records).and_then(|_| out.flush()) {
            write_err = Some(e);
        }
    });
    if let Some(e) = write_err {
        return Err(e).context("writing trace");
    }

    report::write_summary(&mut out, &report)?;
    Ok(())
}

// Prompt when asked to, or when the command line names no tasks
fn wants_prompt(args: &Args) -> Result<bool> {
    let has_cli_tasks = !args.tasks.is_empty() || args.random_tasks.is_some();
    if args.interactive && has_cli_tasks {
        bail!("--interactive cannot be combined with --task or --random-tasks");
    }
    Ok(args.interactive || !has_cli_tasks)
}

fn config_from_args(args: &Args) -> Result<SimConfig> {
    let charge_policy = match args.charge {
        Charge::Slice => ChargePolicy::ConfiguredSlice,
        Charge::Consumed => ChargePolicy::ConsumedTime,
    };
    let config = SimConfig::builder()
        .time_slice_high(args.slice_high)
        .time_slice_low(args.slice_low)
        .sleep_range(args.sleep_min, args.sleep_max)
        .running_power(args.running_power)
        .sleeping_power(args.sleeping_power)
        .idle_power(args.idle_power)
        .charge_policy(charge_policy)
        .build()?;
    Ok(config)
}

fn tasks_from_args(args: &Args) -> Result<Vec<TaskSpec>> {
    let mut tasks = args.tasks.clone();
    if let Some(count) = args.random_tasks {
        let seed = args.seed.unwrap_or_else(rand::random::<u64>);
        tasks.extend(random_tasks(count, 10..=200, 0.3, seed));
    }
    if tasks.is_empty() {
        bail!("no tasks given; use --task, --random-tasks or --interactive");
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pas-model").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_interactive_with_cli_tasks_is_rejected() {
        assert!(wants_prompt(&args(&["--interactive", "--task", "10:high"])).is_err());
        assert!(wants_prompt(&args(&["--interactive", "--random-tasks", "3"])).is_err());
    }

    #[test]
    fn test_prompt_selection() {
        assert!(wants_prompt(&args(&[])).unwrap());
        assert!(wants_prompt(&args(&["--interactive"])).unwrap());
        assert!(!wants_prompt(&args(&["--task", "10:low"])).unwrap());
    }
}
