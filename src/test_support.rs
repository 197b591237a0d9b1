use crate::job::Job;
use crate::locks::LockSpec;
use std::sync::mpsc::{self, Receiver, Sender};

pub(crate) fn spec(key: &str, ttl_secs: u64) -> LockSpec {
    LockSpec::from_secs(key, ttl_secs).unwrap()
}

/// Job that counts its invocations and optionally fails.
#[derive(Debug, Default)]
pub(crate) struct CountingJob {
    pub runs: usize,
    fail_with: Option<String>,
}

impl CountingJob {
    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            runs: 0,
            fail_with: Some(reason.to_string()),
        }
    }
}

impl Job for CountingJob {
    fn name(&self) -> &str {
        "counting"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.runs += 1;
        match &self.fail_with {
            Some(reason) => anyhow::bail!("{}", reason),
            None => Ok(()),
        }
    }
}

/// Job that reports when it starts and then blocks until told to finish.
///
/// Lets a test hold the lock open while other instances contend for it.
pub(crate) struct GatedJob {
    started: Sender<()>,
    proceed: Receiver<()>,
}

/// Handle the test keeps to observe and release a `GatedJob`.
pub(crate) struct Gate {
    pub started: Receiver<()>,
    pub proceed: Sender<()>,
}

pub(crate) fn gated_job() -> (GatedJob, Gate) {
    let (started_tx, started_rx) = mpsc::channel();
    let (proceed_tx, proceed_rx) = mpsc::channel();
    (
        GatedJob {
            started: started_tx,
            proceed: proceed_rx,
        },
        Gate {
            started: started_rx,
            proceed: proceed_tx,
        },
    )
}

impl Job for GatedJob {
    fn name(&self) -> &str {
        "gated"
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.started.send(())?;
        self.proceed.recv()?;
        Ok(())
    }
}
