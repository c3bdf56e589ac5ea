use std::{
    io::Read,
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    time::{Duration, Instant},
};

use crate::{
    engine::{cancel::CancelToken, config::EngineConfig, temp::TempScript},
    foundation::error::{AnimateError, AnimateResult},
    pipeline::job::AnimationJob,
};

#[derive(Clone, Debug)]
/// Everything a finished engine process left behind.
pub struct RenderOutput {
    /// Exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Wall time from spawn to exit.
    pub elapsed: Duration,
}

impl RenderOutput {
    /// `true` when the engine exited with code 0.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs the external engine for one job at a time, blocking the calling thread.
#[derive(Clone, Debug)]
pub struct RenderOrchestrator {
    config: EngineConfig,
}

impl RenderOrchestrator {
    /// Orchestrator for a validated engine configuration.
    pub fn new(config: EngineConfig) -> AnimateResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the engine and require a zero exit status.
    ///
    /// A non-zero exit becomes [`AnimateError::RenderProcessFailure`] carrying the
    /// captured stderr (or stdout, if stderr was empty).
    pub fn render(
        &self,
        job: &AnimationJob,
        script: &str,
        cancel: &CancelToken,
    ) -> AnimateResult<RenderOutput> {
        let output = self.run(job, script, cancel)?;
        if output.success() {
            return Ok(output);
        }

        let diagnostics = if output.stderr.trim().is_empty() {
            output.stdout
        } else {
            output.stderr
        };
        tracing::error!(
            job = %job.job_id,
            status = %output.status,
            "render engine failed"
        );
        Err(AnimateError::RenderProcessFailure {
            code: output.status.code(),
            stderr: diagnostics,
        })
    }

    /// Write the script, run the engine to completion, and return what it produced.
    ///
    /// The exit status is not interpreted. The script file is removed before
    /// this returns, whatever the outcome.
    #[tracing::instrument(skip_all, fields(job = %job.job_id, quality = %job.quality))]
    pub fn run(
        &self,
        job: &AnimationJob,
        script: &str,
        cancel: &CancelToken,
    ) -> AnimateResult<RenderOutput> {
        ensure_dir(&job.output_dir)?;
        ensure_dir(&job.temp_dir)?;

        let script_file = TempScript::create(job.script_path(), script)?;

        let mut cmd = self.command(script_file.path(), job);
        tracing::debug!(command = ?cmd, "spawning render engine");

        let child = cmd.spawn().map_err(|source| AnimateError::EngineSpawn {
            engine: self.config.program.clone(),
            source,
        })?;

        let output = self.supervise(child, cancel)?;
        tracing::debug!(
            status = %output.status,
            elapsed_ms = output.elapsed.as_millis() as u64,
            stdout = %output.stdout.trim(),
            stderr = %output.stderr.trim(),
            "render engine exited"
        );
        Ok(output)
    }

    fn command(&self, script_path: &Path, job: &AnimationJob) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(script_path)
            .arg(&self.config.scene)
            .arg("-o")
            .arg(job.output_filename())
            .arg("--media_dir")
            .arg(&job.output_dir)
            .args(["-q", job.quality.flag()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn supervise(&self, mut child: Child, cancel: &CancelToken) -> AnimateResult<RenderOutput> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("failed to open engine stdout (unexpected)"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("failed to open engine stderr (unexpected)"))?;
        let (tx, rx) = mpsc::channel();
        drain(stdout, Stream::Stdout, tx.clone());
        drain(stderr, Stream::Stderr, tx);

        let timeout = self.config.timeout();
        let poll = self.config.poll_interval();
        let started = Instant::now();

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    kill_and_reap(&mut child);
                    return Err(AnimateError::io("wait for render engine", e));
                }
            }

            if cancel.is_cancelled() {
                tracing::warn!("render cancelled, killing engine");
                kill_and_reap(&mut child);
                return Err(AnimateError::Cancelled);
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                tracing::warn!(?timeout, "render timed out, killing engine");
                kill_and_reap(&mut child);
                return Err(AnimateError::RenderTimeout { timeout });
            }

            std::thread::sleep(poll.min(timeout - elapsed));
        };
        let elapsed = started.elapsed();

        let (stdout, stderr) = collect_output(&rx, cancel, started, timeout, poll)?;
        Ok(RenderOutput {
            status,
            stdout,
            stderr,
            elapsed,
        })
    }
}

/// Return `true` when `<program> [args] --version` runs and exits 0.
pub fn engine_available(config: &EngineConfig) -> bool {
    Command::new(&config.program)
        .args(&config.args)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ensure_dir(dir: &Path) -> AnimateResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AnimateError::io(format!("create directory '{}'", dir.display()), e))
}

#[derive(Clone, Copy, Debug)]
enum Stream {
    Stdout,
    Stderr,
}

type Drained = (Stream, std::io::Result<Vec<u8>>);

fn drain<R: Read + Send + 'static>(mut pipe: R, stream: Stream, tx: Sender<Drained>) {
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        let read = pipe.read_to_end(&mut bytes).map(|_| bytes);
        let _ = tx.send((stream, read));
    });
}

// The engine has exited, but anything it started may still hold the pipes.
// The render deadline and the cancel flag keep applying until both close.
fn collect_output(
    rx: &Receiver<Drained>,
    cancel: &CancelToken,
    started: Instant,
    timeout: Duration,
    poll: Duration,
) -> AnimateResult<(String, String)> {
    let mut stdout = None;
    let mut stderr = None;

    while stdout.is_none() || stderr.is_none() {
        let remaining = timeout.saturating_sub(started.elapsed());
        match rx.recv_timeout(poll.min(remaining)) {
            Ok((Stream::Stdout, read)) => stdout = Some(decode(read, "stdout")?),
            Ok((Stream::Stderr, read)) => stderr = Some(decode(read, "stderr")?),
            Err(RecvTimeoutError::Timeout) => {
                if cancel.is_cancelled() {
                    tracing::warn!("render cancelled while engine output was still open");
                    return Err(AnimateError::Cancelled);
                }
                if started.elapsed() >= timeout {
                    tracing::warn!(
                        ?timeout,
                        "engine exited but its output stayed open past the timeout"
                    );
                    return Err(AnimateError::RenderTimeout { timeout });
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("engine output drain thread panicked").into());
            }
        }
    }

    Ok((stdout.unwrap_or_default(), stderr.unwrap_or_default()))
}

fn decode(read: std::io::Result<Vec<u8>>, stream: &str) -> AnimateResult<String> {
    let bytes = read.map_err(|e| AnimateError::io(format!("read engine {stream}"), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// Drain threads of a killed process are left to finish on their own: a
// grandchild may still hold the pipes open.
fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!(error = %e, "kill failed (process already exited?)");
    }
    let _ = child.wait();
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runner.rs"]
mod tests;
