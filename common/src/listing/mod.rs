//! Reading the VM table printed by the listing helper.
//!
//! Every row of interest has the VM name in its first cell and the network information in
//! its second cell. Three readings of that cell exist:
//!
//! - `<ip>[, <ip>]`, the internal address optionally followed by the external one
//! - `<project-id>=<ip>`, a single address on the project network
//! - ignored, when only the names are needed
//!
//! Rows that do not fit the reading are skipped and logged at debug level. The helper
//! prints a header row and borders so skipping is the normal case for a few lines.

mod command;
mod table;

use std::collections::BTreeMap;

pub use command::ListingCommand;
use table::{parse_table, TableRow};

use crate::vm_name::VmNamePattern;

/// The addresses of a VM as listed by the helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmAddresses {
    pub internal: String,
    pub external: Option<String>,
}

impl VmAddresses {
    /// Parse `<ip>` or `<ip>, <ip>`. Each address is a single token.
    pub fn parse(cell: &str) -> Option<VmAddresses> {
        let mut parts = cell.split(',').map(str::trim);

        let internal = parts.next().filter(|p| is_single_token(p))?;
        let external = match parts.next() {
            Some(p) if is_single_token(p) => Some(p.to_string()),
            Some(_) => return None,
            None => None,
        };

        if parts.next().is_some() {
            return None;
        }

        Some(VmAddresses {
            internal: internal.to_string(),
            external,
        })
    }
}

fn is_single_token(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

/// Map each `<prefix>-<digits>` VM to its internal and external addresses.
pub fn parse_vm_addresses(text: &str, vm_prefix: &str) -> BTreeMap<String, VmAddresses> {
    let pattern = VmNamePattern::ordinal(vm_prefix);

    rows_for(text, &pattern)
        .filter_map(|(row, name)| {
            let addresses = row.cell(1).and_then(VmAddresses::parse);
            if addresses.is_none() {
                tracing::debug!(
                    "Skipping row {} for {}: no usable addresses in {:?}",
                    row.line_number,
                    name,
                    row.cell(1)
                );
            }
            addresses.map(|addresses| (name, addresses))
        })
        .collect()
}

/// Map each `<prefix>-<digits>` VM to its address on the `project_id` network.
///
/// Only cells consisting of exactly `<project_id>=<ip>` are used, a VM with more than
/// one address on the row is skipped.
pub fn parse_project_addresses(
    text: &str,
    vm_prefix: &str,
    project_id: &str,
) -> BTreeMap<String, String> {
    let pattern = VmNamePattern::ordinal(vm_prefix);

    rows_for(text, &pattern)
        .filter_map(|(row, name)| {
            let ip = row
                .cell(1)
                .and_then(|cell| cell.strip_prefix(project_id))
                .and_then(|rest| rest.strip_prefix('='))
                .filter(|ip| is_single_token(ip));

            match ip {
                Some(ip) => {
                    tracing::debug!("Found VM: {} with IP: {}", name, ip);
                    Some((name, ip.to_string()))
                }
                None => {
                    tracing::debug!(
                        "Skipping row {} for {}: no single {} address in {:?}",
                        row.line_number,
                        name,
                        project_id,
                        row.cell(1)
                    );
                    None
                }
            }
        })
        .collect()
}

/// The names of the listed VMs, in the order the helper printed them.
///
/// Names only need to start with the prefix, see [`VmNamePattern::loose`].
pub fn parse_vm_names(text: &str, vm_prefix: &str) -> Vec<String> {
    let pattern = VmNamePattern::loose(vm_prefix);

    rows_for(text, &pattern).map(|(_, name)| name).collect()
}

fn rows_for<'a>(
    text: &str,
    pattern: &'a VmNamePattern,
) -> impl Iterator<Item = (TableRow, String)> + 'a {
    parse_table(text).into_iter().filter_map(move |row| {
        let name = row.cell(0).filter(|name| pattern.is_match(name))?;
        let name = name.to_string();
        Some((row, name))
    })
}
