use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    IO(#[from] io::Error),
    #[error("Failed to read inventory file {path}")]
    InventoryRead { path: PathBuf, source: io::Error },
    #[error("Failed to write inventory file {path}")]
    InventoryWrite { path: PathBuf, source: io::Error },
    #[error("Invalid listing command '{0}'")]
    InvalidListingCommand(String),
    #[error("Failed to start listing command '{command}'")]
    ListingSpawn { command: String, source: io::Error },
    #[error("Listing command '{command}' did not finish within {timeout:?}")]
    ListingTimeout { command: String, timeout: Duration },
    #[error("Listing command '{command}' exited with {status}: {stderr}")]
    ListingFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Error while writing CSV")]
    Csv(#[from] csv::Error),
}
