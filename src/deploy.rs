use async_trait::async_trait;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to spawn deploy command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("deploy command exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("deploy task did not complete: {0}")]
    Task(String),
}

/// Runs whatever brings the server up to date after a push.
#[async_trait]
pub trait DeployRunner: Send + Sync {
    async fn run(&self) -> Result<DeployOutput, DeployError>;
}

/// Runs a shell command line through `sh -c`, one deploy at a time.
///
/// Each deploy runs on its own task, so it completes even when the caller
/// stops waiting for it.
pub struct ShellDeployRunner {
    command: Arc<str>,
    lock: Arc<Mutex<()>>,
}

impl ShellDeployRunner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Arc::from(command.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

async fn run_shell(command: &str) -> Result<DeployOutput, DeployError> {
    info!("Running deploy command: {}", command);

    let output = Command::new("sh").arg("-c").arg(command).output().await?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    debug!("Deploy command exited with {:?}", output.status.code());

    if !output.status.success() {
        return Err(DeployError::Failed {
            status: output.status.code(),
            stderr,
        });
    }

    Ok(DeployOutput { stdout, stderr })
}

#[async_trait]
impl DeployRunner for ShellDeployRunner {
    async fn run(&self) -> Result<DeployOutput, DeployError> {
        let command = self.command.clone();
        let lock = self.lock.clone();

        let task = tokio::spawn(async move {
            let _guard = lock.lock_owned().await;
            run_shell(&command).await
        });

        task.await.map_err(|e| DeployError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_successful_command_captures_output() {
        let runner = ShellDeployRunner::new("echo updated && echo warning >&2");
        let output = runner.run().await.unwrap();
        assert_eq!(output.stdout.trim(), "updated");
        assert_eq!(output.stderr.trim(), "warning");
    }

    #[tokio::test]
    async fn test_failing_command_reports_status_and_stderr() {
        let runner = ShellDeployRunner::new("echo 'not a git repository' >&2; exit 3");
        match runner.run().await {
            Err(DeployError::Failed { status, stderr }) => {
                assert_eq!(status, Some(3));
                assert!(stderr.contains("not a git repository"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deploy_finishes_after_caller_gives_up() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("deployed");
        let runner = ShellDeployRunner::new(format!("sleep 0.3; touch {}", marker.display()));

        let waited = tokio::time::timeout(Duration::from_millis(50), runner.run()).await;
        assert!(waited.is_err(), "deploy should still be running");

        for _ in 0..40 {
            if marker.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(marker.exists(), "deploy was cut short when its caller went away");
    }

    #[tokio::test]
    async fn test_deploys_do_not_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("running");
        let log = dir.path().join("log");
        let command = format!(
            "if [ -e {m} ]; then echo overlap >> {l}; fi; touch {m}; sleep 0.2; rm {m}; echo done >> {l}",
            m = marker.display(),
            l = log.display(),
        );
        let runner = Arc::new(ShellDeployRunner::new(command));

        let first = tokio::spawn({
            let runner = runner.clone();
            async move { runner.run().await }
        });
        let second = tokio::spawn({
            let runner = runner.clone();
            async move { runner.run().await }
        });
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let contents = std::fs::read_to_string(&log).unwrap();
        assert!(!contents.contains("overlap"));
        assert_eq!(contents.lines().count(), 2);
    }
}
