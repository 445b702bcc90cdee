//! External process execution.
//!
//! Every external tool (gpg, the vault password helper, ansible-vault, the
//! YAML transcoder) goes through a [`Runner`]. The system runner never
//! invokes a shell: the program is resolved to an absolute path and the
//! arguments are passed as a discrete list.

use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::{ProcessError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one external process.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub code: Option<i32>,
    /// Standard output. May hold plaintext, so it is wiped on drop.
    pub stdout: Zeroizing<Vec<u8>>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// True when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard error as text, lossily decoded.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Turn a non-zero exit into `ProcessError::Failed`.
    pub fn check(self, program: &Path) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(ProcessError::Failed {
            program: program_name(program),
            code: self.code,
            stderr: self.stderr_text(),
        }
        .into())
    }
}

/// Executes external programs.
///
/// Implemented by [`System`] for real child processes. Tests substitute a
/// recording fake.
pub trait Runner {
    /// Resolve an executable name (or path) to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it is not on the search path.
    fn resolve(&self, program: &str) -> Result<PathBuf>;

    /// Run `program` with `args`, feeding `input` on stdin when given.
    ///
    /// A non-zero exit is not an error here; see [`ProcessOutput::check`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError` if the process cannot be spawned, its pipes
    /// fail, or it exceeds the runner's timeout.
    fn run(&self, program: &Path, args: &[&OsStr], input: Option<&[u8]>) -> Result<ProcessOutput>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn resolve(&self, program: &str) -> Result<PathBuf> {
        (**self).resolve(program)
    }

    fn run(&self, program: &Path, args: &[&OsStr], input: Option<&[u8]>) -> Result<ProcessOutput> {
        (**self).run(program, args, input)
    }
}

/// Runs real child processes, one at a time, with an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct System {
    timeout: Option<Duration>,
}

impl System {
    /// A runner that kills children still running after `timeout`.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Runner for System {
    fn resolve(&self, program: &str) -> Result<PathBuf> {
        let path = which::which(program).map_err(|source| ProcessError::ExecutableNotFound {
            name: program.to_string(),
            source,
        })?;
        debug!(program, path = %path.display(), "resolved executable");
        Ok(path)
    }

    fn run(&self, program: &Path, args: &[&OsStr], input: Option<&[u8]>) -> Result<ProcessOutput> {
        let name = program_name(program);
        trace!(
            program = %name,
            args = args.len(),
            input_len = input.map_or(0, <[u8]>::len),
            "spawning"
        );

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a timeout also reaches helpers the tool forks.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            program: name.clone(),
            source,
        })?;

        let io_error = |source| ProcessError::Io {
            program: name.clone(),
            source,
        };
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);

        // Pipes are serviced on their own threads so a chatty child can
        // never block on a full pipe while we wait for it. The threads are
        // owned: once the deadline passes they are abandoned, since a
        // forked helper may keep the pipes open after the child is gone.
        let writer = child.stdin.take().zip(input).map(|(pipe, data)| {
            let data = Zeroizing::new(data.to_vec());
            thread::spawn(move || write_input(pipe, &data))
        });
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out = thread::spawn(move || read_pipe(stdout));
        let err = thread::spawn(move || read_pipe(stderr));

        let status = wait_until(&mut child, deadline).map_err(io_error)?;
        let finished = status.and_then(|status| {
            let written = match writer {
                Some(writer) => collect(writer, deadline)?,
                None => Ok(()),
            };
            Some((status, written, collect(out, deadline)?, collect(err, deadline)?))
        });

        let Some((status, written, out, err)) = finished else {
            kill_group(&mut child);
            debug!(program = %name, "process timed out");
            return Err(ProcessError::Timeout {
                program: name.clone(),
                // a deadline only passes when a timeout is set
                timeout: self.timeout.unwrap_or_default(),
            }
            .into());
        };
        written.map_err(io_error)?;
        let stdout = Zeroizing::new(out.map_err(io_error)?);
        let stderr = err.map_err(io_error)?;

        trace!(
            program = %name,
            code = ?status.code(),
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "process finished"
        );

        Ok(ProcessOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Wait for `child` until `deadline`.
///
/// Returns `Ok(None)` if the deadline passed first. The child is left
/// running; see [`kill_group`].
fn wait_until(child: &mut Child, deadline: Option<Instant>) -> io::Result<Option<ExitStatus>> {
    let Some(deadline) = deadline else {
        return child.wait().map(Some);
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Join a pipe thread, giving up at `deadline`.
fn collect<T>(handle: JoinHandle<io::Result<T>>, deadline: Option<Instant>) -> Option<io::Result<T>> {
    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                return None;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
    Some(
        handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "pipe thread panicked"))),
    )
}

/// Kill the child and everything left in its process group, then reap it.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: plain kill(2) on the group the child leads.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Write `data` to the child's stdin and close it.
///
/// A child that exits without reading its input is not an error.
fn write_input(mut pipe: impl Write, data: &[u8]) -> io::Result<()> {
    match pipe.write_all(data) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn read_pipe(pipe: Option<impl Read>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Short display name for a program path (`/usr/bin/gpg` -> `gpg`).
pub fn program_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}
