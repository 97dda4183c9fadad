//! External process execution
//!
//! Runs an assembled [`CommandSpec`], inheriting stdout/stderr so the
//! external compiler's output lands in the caller's terminal. Tool output is
//! never parsed or interpreted here.

use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::command::CommandSpec;
use crate::error::{Error, Result};
use crate::types::ExecutionResult;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Launch the process and wait for completion, enforcing the spec's timeout
/// when one is set. A non-zero exit is an error; a timeout is reported
/// distinctly after the process has been killed.
pub fn execute(spec: &CommandSpec) -> Result<ExecutionResult> {
    info!("Executing: {}", spec.to_command_line());
    let start = Instant::now();

    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|source| Error::ProcessStartError {
        program: spec.program.clone(),
        source,
    })?;

    let status = match spec.timeout {
        Some(timeout) => wait_with_timeout(&mut child, timeout)?,
        None => child.wait()?,
    };
    let duration = start.elapsed();
    debug!("Process finished in {:.1}s", duration.as_secs_f64());

    if !status.success() {
        return Err(Error::ProcessExecutionError(status.code().unwrap_or(-1)));
    }
    Ok(ExecutionResult {
        status: status.code().unwrap_or(0),
        duration,
    })
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            warn!("Process did not finish within {:?}, killing it", timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::ProcessTimeoutError(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
