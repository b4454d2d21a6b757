use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use typepipe_types::CommandSpec;

use crate::error::{PipeError, Result};

/// Runs the transform command once per matched line
#[derive(Clone, Debug)]
pub struct Transformer {
    command: CommandSpec,
}

impl Transformer {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }

    /// Spawn the command with `input` as its entire stdin and wait for it to exit.
    ///
    /// The child's stdout and stderr are the process's own, so its output reaches
    /// downstream consumers as the child writes it. Arguments are passed verbatim,
    /// no shell is involved. The exit status is returned for logging only.
    pub async fn run(&self, input: &[u8]) -> Result<ExitStatus> {
        let program = &self.command.program;

        let mut child = Command::new(program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PipeError::Spawn {
                program: program.clone(),
                source,
            })?;

        tracing::debug!(command = %self.command, pid = ?child.id(), "spawned transform");

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(input).await {
                Ok(()) => {}
                // The child exited or closed stdin without reading it all
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!(command = %self.command, "transform closed stdin early");
                }
                Err(source) => {
                    return Err(PipeError::ChildInput {
                        program: program.clone(),
                        source,
                    });
                }
            }
            // Dropping stdin sends EOF
        }

        let status = child.wait().await.map_err(|source| PipeError::Wait {
            program: program.clone(),
            source,
        })?;

        if !status.success() {
            tracing::debug!(command = %self.command, %status, "transform exited unsuccessfully");
        }

        Ok(status)
    }
}
