//! Child process execution with a deadline
//!
//! Commands run on a single-threaded tokio runtime so the wait and the
//! deadline can be raced with `select!`. stdout and stderr are read on
//! their own tasks, so a command that writes more than a pipe buffer never
//! blocks on a full pipe.
//!
//! A killed child may leave descendants behind that still hold the pipes
//! open (`git push` hands stderr to the `ssh` it spawns). Once the deadline
//! has passed the readers only get a short grace period, then whatever
//! they collected is returned.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::runtime;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

/// How long output readers may run on after the deadline
const READER_GRACE: Duration = Duration::from_millis(250);

/// Result of a finished (or killed) child process
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    /// The child was killed because it ran past the timeout
    pub timed_out: bool,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.status.success()
    }
}

/// Spawn `command` with stdin closed and wait for it, up to `timeout`.
///
/// Only spawn and wait failures are errors; a non-zero exit or a timeout
/// is reported through `ProcessOutput`.
pub fn run_with_timeout(
    command: std::process::Command,
    timeout: Option<Duration>,
) -> io::Result<ProcessOutput> {
    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(run(Command::from(command), timeout))
}

async fn run(mut command: Command, timeout: Option<Duration>) -> io::Result<ProcessOutput> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn()?;
    let stdout = tokio::spawn(read_stream(child.stdout.take()));
    let stderr = tokio::spawn(read_stream(child.stderr.take()));

    let deadline = timeout.map(|limit| Instant::now() + limit);
    let (status, timed_out) = match deadline {
        None => (child.wait().await?, false),
        Some(deadline) => tokio::select! {
            status = child.wait() => (status?, false),
            _ = time::sleep_until(deadline) => {
                debug!(pid = child.id(), "deadline passed, killing child");
                // The child may exit between the deadline and the kill
                let _ = child.start_kill();
                (child.wait().await?, true)
            }
        },
    };

    let readers_until = deadline.map(|d| d.max(Instant::now()) + READER_GRACE);
    Ok(ProcessOutput {
        status,
        stdout: collect(stdout, readers_until).await,
        stderr: collect(stderr, readers_until).await,
        timed_out,
    })
}

async fn read_stream<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}

/// Output of a reader task; a reader still running at `until` is abandoned
async fn collect(reader: JoinHandle<Vec<u8>>, until: Option<Instant>) -> String {
    let bytes = match until {
        Some(until) => time::timeout_at(until, reader).await.ok().and_then(Result::ok),
        None => reader.await.ok(),
    };
    bytes
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
