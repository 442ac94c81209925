use std::{process::Stdio, time::Duration};

use tokio::process::Command;

use crate::Error;

/// The external helper that prints the VM table for a prefix, e.g. `./openstack/list-IP.sh demo`.
#[derive(Debug, Clone)]
pub struct ListingCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ListingCommand {
    /// Build a command from a shell-like command line. The VM prefix is appended as a separate
    /// argument when the command runs, it is never interpolated into a shell.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self, Error> {
        let mut words = shell_words::split(command_line)
            .map_err(|_| Error::InvalidListingCommand(command_line.to_string()))?
            .into_iter();

        let Some(program) = words.next() else {
            return Err(Error::InvalidListingCommand(command_line.to_string()));
        };

        Ok(Self {
            program,
            args: words.collect(),
            timeout,
        })
    }

    fn command_line(&self, vm_prefix: &str) -> String {
        let words = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(std::iter::once(vm_prefix));

        shell_words::join(words)
    }

    /// Run the helper for `vm_prefix` and return its trimmed stdout.
    ///
    /// A non-zero exit status is an error carrying the helper's stderr. The helper is killed
    /// if it has not finished within the configured timeout.
    pub async fn list(&self, vm_prefix: &str) -> Result<String, Error> {
        let command_line = self.command_line(vm_prefix);
        tracing::debug!("Running listing command: {}", command_line);

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(vm_prefix)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::ListingSpawn {
                command: command_line.clone(),
                source,
            })?;

        // Dropping the future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                return Err(Error::ListingTimeout {
                    command: command_line,
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            return Err(Error::ListingFailed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!("Listing output:\n{}", stdout);

        Ok(stdout)
    }
}
