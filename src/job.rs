//! The protected unit of work.
//!
//! A job is opaque to the coordinator: it only learns whether the job
//! returned an error. Closures returning `anyhow::Result<()>` are jobs.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::config::JobConfig;

/// Work that must not run on two instances at once.
pub trait Job {
    /// Name used in logs.
    fn name(&self) -> &str {
        "job"
    }

    /// Run the job to completion.
    fn run(&mut self) -> anyhow::Result<()>;
}

impl<F> Job for F
where
    F: FnMut() -> anyhow::Result<()>,
{
    fn run(&mut self) -> anyhow::Result<()> {
        self()
    }
}

/// Built-in job: a fixed number of paced steps with progress output.
#[derive(Debug)]
pub struct SimulatedJob<W: Write = io::Stdout> {
    steps: u32,
    step_interval: Duration,
    out: W,
}

impl SimulatedJob {
    /// Create a job writing progress to standard output.
    pub fn new(steps: u32, step_interval: Duration) -> Self {
        Self::with_output(steps, step_interval, io::stdout())
    }

    pub fn from_config(config: &JobConfig) -> Self {
        Self::new(
            config.steps,
            Duration::from_millis(config.step_interval_ms),
        )
    }
}

impl<W: Write> SimulatedJob<W> {
    /// Create a job writing progress to `out`.
    pub fn with_output(steps: u32, step_interval: Duration, out: W) -> Self {
        Self {
            steps,
            step_interval,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write> Job for SimulatedJob<W> {
    fn name(&self) -> &str {
        "simulated"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Job started")?;

        for step in 1..=self.steps {
            writeln!(self.out, "Executing step {}...", step)?;
            self.out.flush()?;
            thread::sleep(self.step_interval);
        }

        writeln!(self.out, "Job finished")?;
        Ok(())
    }
}
