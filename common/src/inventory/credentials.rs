use std::collections::BTreeMap;

use super::Inventory;
use crate::vm_name::VmNamePattern;

/// The login handed out to trainees, regardless of `ansible_user`.
pub const DEFAULT_TRAINING_USERNAME: &str = "training";
pub const PASSWORD_NOT_FOUND: &str = "Password not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmCredentials {
    pub username: String,
    pub password: Option<String>,
}

impl VmCredentials {
    pub fn password_or_placeholder(&self) -> &str {
        self.password.as_deref().unwrap_or(PASSWORD_NOT_FOUND)
    }
}

/// Collect the credentials of every host named `<prefix>-...`.
///
/// A host without a quoted password is still returned, with no password.
pub fn read_credentials(inventory: &Inventory, vm_prefix: &str) -> BTreeMap<String, VmCredentials> {
    let pattern = VmNamePattern::dashed(vm_prefix);

    inventory
        .hosts()
        .filter(|host| {
            let matched = pattern.is_match(host.name());
            if !matched {
                tracing::debug!("Skipping inventory host {}", host.name());
            }
            matched
        })
        .map(|host| {
            let credentials = VmCredentials {
                username: DEFAULT_TRAINING_USERNAME.to_string(),
                password: host.training_password().map(str::to_string),
            };
            if credentials.password.is_none() {
                tracing::debug!("No password for {} in inventory", host.name());
            }
            (host.name().to_string(), credentials)
        })
        .collect()
}
