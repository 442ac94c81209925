//! The Ansible-style static inventory listing the training VMs.
//!
//! ```text
//! [training]
//! demo-01 ansible_host=203.0.113.9 ansible_user=ubuntu training_password="..."
//! demo-02 ansible_host= ansible_user=ubuntu training_password="..."
//! ```
//!
//! The file is loaded into an ordered list of lines, modified through named operations
//! and saved back atomically. Lines nobody touched are written back as they were read.

mod credentials;
mod host;
mod reconcile;

use std::{
    fs,
    io::{ErrorKind, Write as _},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

pub use credentials::{
    read_credentials, VmCredentials, DEFAULT_TRAINING_USERNAME, PASSWORD_NOT_FOUND,
};
pub use host::{
    HostLine, HostToken, ANSIBLE_HOST, ANSIBLE_USER, DEFAULT_ANSIBLE_USER, TRAINING_PASSWORD,
};
pub use reconcile::{
    fill_missing_keys, update_host_addresses, Alignment, HostRewrite, IpUpdateReport,
    KeyUpdateReport, LineOutcome,
};

use crate::Error;

/// The group every training VM belongs to.
pub const TRAINING_GROUP: &str = "training";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryLine {
    /// A group header such as `[training]`
    Group(String),
    Host(HostLine),
    /// Blank lines and comments
    Other(String),
}

impl InventoryLine {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if let Some(group) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return InventoryLine::Group(group.to_string());
        }

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            return InventoryLine::Other(line.trim_end().to_string());
        }

        match HostLine::parse(line) {
            Some(host) => InventoryLine::Host(host),
            None => InventoryLine::Other(line.trim_end().to_string()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            InventoryLine::Group(group) => format!("[{group}]"),
            InventoryLine::Host(host) => host.render(),
            InventoryLine::Other(text) => text.clone(),
        }
    }

    pub fn is_group(&self, name: &str) -> bool {
        matches!(self, InventoryLine::Group(group) if group == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    lines: Vec<InventoryLine>,
}

impl Inventory {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(InventoryLine::parse).collect(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|source| Error::InventoryRead {
            path: path.to_owned(),
            source,
        })?;

        Ok(Self::parse(&text))
    }

    /// Write the inventory to a temporary file next to `path` and rename it into place,
    /// so a failure part way through never leaves a truncated inventory behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let write_error = |source: std::io::Error| Error::InventoryWrite {
            path: path.to_owned(),
            source,
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(&directory).map_err(write_error)?;
        file.write_all(self.render().as_bytes())
            .map_err(write_error)?;

        // Temporary files are created owner-only, keep the mode of the file being replaced
        let permissions = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(write_error(e)),
        };
        if let Some(permissions) = permissions {
            file.as_file()
                .set_permissions(permissions)
                .map_err(write_error)?;
        }

        file.as_file().sync_all().map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;

        Ok(())
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}\n", line.render()))
            .collect()
    }

    pub fn lines(&self) -> &[InventoryLine] {
        &self.lines
    }

    pub fn hosts(&self) -> impl Iterator<Item = &HostLine> {
        self.lines.iter().filter_map(|line| match line {
            InventoryLine::Host(host) => Some(host),
            _ => None,
        })
    }

    pub fn find_host(&self, name: &str) -> Option<&HostLine> {
        self.hosts().find(|host| host.name() == name)
    }

    pub fn push_host(&mut self, host: HostLine) {
        self.lines.push(InventoryLine::Host(host));
    }

    /// Make sure exactly one `[group]` header exists, adding it at the top when missing.
    pub fn ensure_group(&mut self, group: &str) {
        let mut seen = false;
        self.lines.retain(|line| {
            if line.is_group(group) {
                let keep = !seen;
                seen = true;
                keep
            } else {
                true
            }
        });

        if !seen {
            self.lines
                .insert(0, InventoryLine::Group(group.to_string()));
        }
    }

    /// Index just past the last line of the first `[group]` section, that is the next
    /// group header or the end of the file.
    fn group_end(&self, group: &str) -> usize {
        let mut in_group = false;

        for (i, line) in self.lines.iter().enumerate() {
            if let InventoryLine::Group(name) = line {
                if in_group {
                    return i;
                }
                in_group = name == group;
            }
        }

        self.lines.len()
    }
}
