//! Running external tools with a deadline.
//!
//! Output pipes are drained on helper threads while the child is polled with
//! `try_wait`, so a chatty tool cannot fill a pipe and a hung tool is killed
//! once the deadline passes.

use std::io::{self, Read};
use std::process::{Child, Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why a command produced no output.
#[derive(Debug)]
pub(crate) enum RunError {
    /// The program could not be started
    Spawn(io::Error),
    /// Waiting on the child failed
    Wait(io::Error),
    /// The child was still running at the deadline and was killed
    TimedOut(Duration),
}

/// Runs `cmd` to completion, killing it if it runs longer than `timeout`.
///
/// A non-zero exit status is not an error here; callers inspect
/// `Output::status`.
pub(crate) fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, RunError> {
    log::trace!("Running {:?} (timeout {:?})", cmd, timeout);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(RunError::Spawn)?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= timeout => {
                kill(&mut child);
                // Reader threads are left behind: a grandchild may still
                // hold the pipes open.
                return Err(RunError::TimedOut(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL.min(timeout)),
            Err(e) => {
                kill(&mut child);
                return Err(RunError::Wait(e));
            }
        }
    };

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("Failed to kill child process {}: {}", child.id(), e);
    }
    let _ = child.wait();
}
