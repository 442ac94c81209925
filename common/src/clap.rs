use std::{path::PathBuf, process, time::Duration};

use clap::{error::ErrorKind, Args, Parser};

use crate::{listing::ListingCommand, Error};

pub const DEFAULT_INVENTORY_PATH: &str = "./inventory";
pub const DEFAULT_LIST_IPS_COMMAND: &str = "./openstack/list-IP.sh";
pub const DEFAULT_EXPORT_DIR: &str = "./VMs";

/// Location of the Ansible-style inventory file.
#[derive(Args, Clone, Debug)]
pub struct InventoryConfig {
    /// Path to the inventory file
    #[clap(
        name = "inventory",
        long,
        env = "INVENTORY_PATH",
        default_value = DEFAULT_INVENTORY_PATH
    )]
    pub path: PathBuf,
}

/// How to invoke the helper that prints the VM table for a prefix.
#[derive(Args, Clone, Debug)]
pub struct ListingConfig {
    /// The listing helper, the VM prefix is appended as its final argument
    #[clap(
        name = "list-ips-command",
        long,
        env = "LIST_IPS_COMMAND",
        default_value = DEFAULT_LIST_IPS_COMMAND
    )]
    pub command: String,
    /// How long to wait for the listing helper before giving up, e.g. `30s` or `5m`
    #[clap(
        name = "list-ips-timeout",
        long,
        env = "LIST_IPS_TIMEOUT",
        default_value = "5m",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,
}

impl ListingConfig {
    pub fn listing_command(&self) -> Result<ListingCommand, Error> {
        ListingCommand::from_command_line(&self.command, self.timeout)
    }
}

/// Where the export scripts write their output.
#[derive(Args, Clone, Debug)]
pub struct ExportConfig {
    /// Directory receiving the per-VM text files or the CSV report
    #[clap(
        name = "export-dir",
        long,
        env = "EXPORT_DIR",
        default_value = DEFAULT_EXPORT_DIR
    )]
    pub directory: PathBuf,
}

/// Parse the command line, printing the usage to stdout and exiting with status 1 when
/// the arguments are wrong. Help and version requests keep clap's behaviour.
pub fn parse_args_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                println!("{}", error.render());
                process::exit(1);
            }
        },
    }
}
