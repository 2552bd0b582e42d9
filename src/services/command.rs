//! Shell commands run in response to countdown events

use tokio::process::Command;
use tracing::info;

/// Run a user-supplied command through `sh -c`
pub async fn run_finish_command(command: &str) -> Result<(), String> {
    info!("Running finish command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute finish command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "Finish command exited with {}: {}",
            output.status,
            stderr.trim()
        ));
    }

    info!("Finish command completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn succeeds_on_zero_exit() {
        assert!(run_finish_command("true").await.is_ok());
    }

    #[tokio::test]
    async fn reports_stderr_on_failure() {
        let err = run_finish_command("echo boom >&2; exit 3").await.unwrap_err();
        assert!(err.contains("boom"), "unexpected error: {}", err);
    }
}
