//! Process execution collaborator
//!
//! Every manager operation goes through a [`CommandRunner`], so parsing can be
//! exercised against canned output without spawning anything. The only real
//! implementation, [`SystemRunner`], owns the timeout policy.

use crate::error::{MpmError, Result};
use crate::ui;
use std::io::{BufReader, Read};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs an argv to completion and hands back its standard output.
///
/// Launch failures and non-zero exits are errors, never an empty string.
pub trait CommandRunner: Send + Sync {
    fn run(&self, argv: &[String]) -> Result<String>;
}

/// Spawns real processes with `std::process`
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the child once it runs longer than `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<String> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            MpmError::Other("Cannot run an empty command line".to_string())
        })?;
        let label = argv.join(" ");
        ui::debug(&format!("Running: {}", label));

        let mut cmd = Command::new(program);
        cmd.args(args);

        let output = run_command(&mut cmd, &label, self.timeout)?;

        if !output.status.success() {
            return Err(MpmError::CommandExit {
                command: label,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Read `pipe` to its end on a background thread and post the bytes to `tx`.
///
/// The thread is never joined: a grandchild that inherited the pipe may keep
/// it open long after the child itself is gone.
fn drain<R>(pipe: R, stream: Stream, tx: Sender<(Stream, Vec<u8>)>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = BufReader::new(pipe).read_to_end(&mut buf);
        let _ = tx.send((stream, buf));
    });
}

fn timed_out(label: &str, timeout: Option<Duration>) -> MpmError {
    MpmError::SystemCommandFailed {
        command: label.to_string(),
        reason: format!("Command timed out after {:?}", timeout.unwrap_or_default()),
    }
}

fn wait_failed(label: &str, e: std::io::Error) -> MpmError {
    MpmError::SystemCommandFailed {
        command: label.to_string(),
        reason: e.to_string(),
    }
}

/// Wait for `child`, killing it once `deadline` passes
fn wait_child(
    child: &mut Child,
    label: &str,
    deadline: Option<Instant>,
    timeout: Option<Duration>,
) -> Result<ExitStatus> {
    let Some(deadline) = deadline else {
        return child.wait().map_err(|e| wait_failed(label, e));
    };

    loop {
        if let Some(status) = child.try_wait().map_err(|e| wait_failed(label, e))? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(timed_out(label, timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Spawn `cmd` with stdin closed and both output streams captured.
///
/// With a timeout, the deadline covers the child and the collection of its
/// output alike, so a wrapper script whose own child hangs cannot stall the caller.
fn run_command(cmd: &mut Command, label: &str, timeout: Option<Duration>) -> Result<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| MpmError::SystemCommandFailed {
        command: label.to_string(),
        reason: e.to_string(),
    })?;
    let deadline = timeout.map(|t| Instant::now() + t);

    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        drain(stdout, Stream::Stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        drain(stderr, Stream::Stderr, tx.clone());
    }
    drop(tx);

    let status = wait_child(&mut child, label, deadline, timeout)?;

    let mut output = Output {
        status,
        stdout: Vec::new(),
        stderr: Vec::new(),
    };
    loop {
        let received = match deadline {
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
        };
        match received {
            Ok((Stream::Stdout, buf)) => output.stdout = buf,
            Ok((Stream::Stderr, buf)) => output.stderr = buf,
            // Every drain has reported
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => return Err(timed_out(label, timeout)),
        }
    }

    Ok(output)
}
