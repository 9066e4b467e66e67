use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use log::trace;
use tokio::process::Command;
use tokio::time::timeout;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `program` to completion and return its stdout. A non-zero exit or
/// a run longer than `limit` is an error; the child is killed on timeout.
pub async fn run(program: &str, args: &[&str], limit: Duration) -> Result<Vec<u8>> {
    trace!("exec {} {:?}", program, args);

    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    let output = match timeout(limit, cmd.output()).await {
        Ok(output) => output.with_context(|| format!("failed to run {}", program))?,
        Err(_)     => return Err(anyhow!("{} timed out after {:?}", program, limit)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("{} failed ({}): {}", program, output.status, stderr.trim()));
    }

    Ok(output.stdout)
}
