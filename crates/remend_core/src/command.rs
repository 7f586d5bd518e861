//! Timed external command execution.
//!
//! Commands run via `bash -c` with captured output and an enforced deadline.
//! A timed-out child is killed and reported, never left hanging.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured outcome of one external command.
#[derive(Debug)]
pub struct CommandOutput {
    /// Exit code; -1 when terminated by a signal, 124 on timeout.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub duration: Duration,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// Combined stdout + stderr, stderr last.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Runs `command` through `bash -c` in `cwd`, waiting at most `timeout`.
///
/// Returns `Err` only when the child cannot be spawned at all (e.g. the
/// shell is missing); any other outcome, including a timeout, is a regular
/// `CommandOutput`.
pub fn run_shell(
    command: &str,
    cwd: &std::path::Path,
    timeout: Duration,
) -> std::io::Result<CommandOutput> {
    debug!("Running `{}` in {}", command, cwd.display());
    let start = Instant::now();

    let mut child = Command::new("bash")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain the pipes off-thread so a chatty child cannot deadlock the
    // deadline poll below.
    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let (status, timed_out) = wait_with_deadline(&mut child, start, timeout)?;

    let stdout = join_reader(stdout);
    let stderr = join_reader(stderr);
    let duration = start.elapsed();

    let exit_code = if timed_out {
        124
    } else {
        status.unwrap_or(-1)
    };

    Ok(CommandOutput {
        exit_code,
        stdout,
        stderr,
        timed_out,
        duration,
    })
}

fn wait_with_deadline(
    child: &mut Child,
    start: Instant,
    timeout: Duration,
) -> std::io::Result<(Option<i32>, bool)> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status.code(), false));
        }
        if start.elapsed() >= timeout {
            warn!("Command exceeded {:?} timeout, killing", timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Ok((None, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    source: Option<R>,
) -> Option<thread::JoinHandle<String>> {
    source.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
