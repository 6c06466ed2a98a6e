//! git repository initialization for a freshly emitted project
//!
//! Failures here never undo the emitted files; callers surface them as
//! warnings.

use crate::error::VcsError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for each git invocation
const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs `git init` and stages every file in a project root
#[derive(Debug, Clone)]
pub struct GitInitializer {
    program: String,
}

impl Default for GitInitializer {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitInitializer {
    /// Use a specific git executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Initialize a repository in `root` and stage all files
    pub async fn initialize(&self, root: &Path) -> Result<(), VcsError> {
        self.run(root, &["init"]).await?;
        self.run(root, &["add", "."]).await
    }

    async fn run(&self, root: &Path, args: &[&str]) -> Result<(), VcsError> {
        let joined = args.join(" ");
        let mut command = TokioCommand::new(&self.program);
        command
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(GIT_TIMEOUT, command.output()).await {
            Ok(result) => result.map_err(|source| VcsError::Spawn {
                program: self.program.clone(),
                args: joined.clone(),
                source,
            })?,
            Err(_) => {
                return Err(VcsError::TimedOut {
                    program: self.program.clone(),
                    args: joined,
                    timeout: GIT_TIMEOUT,
                })
            }
        };

        if output.status.success() {
            Ok(())
        } else {
            Err(VcsError::Failed {
                program: self.program.clone(),
                args: joined,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
