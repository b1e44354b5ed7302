//! Infrastructure implementation of the `ServiceManager` port.
//!
//! `Launchctl<R>` routes every launchd request through a `CommandRunner`:
//!
//! | operation          | command                              |
//! |--------------------|--------------------------------------|
//! | load               | `launchctl load [-w] <descriptor>`   |
//! | unload             | `launchctl unload [-w] <descriptor>` |
//! | list               | `launchctl list`                     |

use std::process::Output;

use crate::application::ports::{CommandRunner, Job, ServiceManager};
use crate::domain::{JobListing, LaunchError, parse_job_list};

/// Default location of the launchd control utility.
pub const LAUNCHCTL: &str = "/bin/launchctl";

/// Infrastructure adapter that routes all launchctl calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct Launchctl<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> Launchctl<R> {
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, LAUNCHCTL)
    }

    /// Use a launchctl binary at a non-default location.
    pub fn with_program(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    async fn invoke(&self, args: &[&str]) -> Result<String, LaunchError> {
        let command = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(%command, "invoking service manager");

        let output = self.runner.run(&self.program, args).await.map_err(|e| {
            LaunchError::ProcessInvocation {
                program: self.program.clone(),
                reason: format!("{e:#}"),
            }
        })?;

        let text = captured_text(&output);
        if !output.status.success() {
            tracing::warn!(
                %command,
                code = ?output.status.code(),
                "service manager reported failure"
            );
            return Err(LaunchError::ServiceManager {
                command,
                code: output.status.code(),
                output: text,
            });
        }
        Ok(text)
    }
}

/// Stdout followed by stderr, lossily decoded and trimmed.
fn captured_text(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim(), stderr.trim()) {
        ("", err) => err.to_string(),
        (out, "") => out.to_string(),
        (out, err) => format!("{out}\n{err}"),
    }
}

fn descriptor_arg(job: &Job) -> Result<&str, LaunchError> {
    job.descriptor.to_str().ok_or_else(|| {
        LaunchError::DescriptorGeneration(format!(
            "descriptor path '{}' is not valid UTF-8",
            job.descriptor.display()
        ))
    })
}

impl<R> ServiceManager for Launchctl<R>
where
    R: CommandRunner + Sync,
{
    async fn load(&self, job: &Job, force: bool) -> Result<String, LaunchError> {
        let path = descriptor_arg(job)?;
        if force {
            self.invoke(&["load", "-w", path]).await
        } else {
            self.invoke(&["load", path]).await
        }
    }

    async fn unload(&self, job: &Job, disable: bool) -> Result<String, LaunchError> {
        let path = descriptor_arg(job)?;
        if disable {
            self.invoke(&["unload", "-w", path]).await
        } else {
            self.invoke(&["unload", path]).await
        }
    }

    async fn list(&self) -> Result<Vec<JobListing>, LaunchError> {
        let stdout = self.invoke(&["list"]).await?;
        Ok(parse_job_list(&stdout))
    }
}
