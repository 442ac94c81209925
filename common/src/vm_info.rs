use std::collections::BTreeMap;

use itertools::{EitherOrBoth, Itertools as _};

use crate::{inventory::VmCredentials, listing::VmAddresses, NOT_FOUND};

/// Everything known about one VM, from the listing helper and from the inventory.
///
/// Either side may be missing. The accessors fall back to [`NOT_FOUND`] so every field of
/// an exported record comes from its own source or is the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmRecord {
    pub name: String,
    pub addresses: Option<VmAddresses>,
    pub credentials: Option<VmCredentials>,
}

impl VmRecord {
    pub fn username(&self) -> &str {
        self.credentials
            .as_ref()
            .map_or(NOT_FOUND, |c| c.username.as_str())
    }

    pub fn password(&self) -> &str {
        self.credentials
            .as_ref()
            .map_or(NOT_FOUND, |c| c.password_or_placeholder())
    }

    pub fn external_ip(&self) -> &str {
        self.addresses
            .as_ref()
            .and_then(|a| a.external.as_deref())
            .unwrap_or(NOT_FOUND)
    }
}

/// One record per VM named by either source, sorted by name.
pub fn merge_records(
    addresses: BTreeMap<String, VmAddresses>,
    credentials: BTreeMap<String, VmCredentials>,
) -> Vec<VmRecord> {
    addresses
        .into_iter()
        .merge_join_by(credentials, |(a, _), (b, _)| a.cmp(b))
        .map(|entry| match entry {
            EitherOrBoth::Both((name, addresses), (_, credentials)) => VmRecord {
                name,
                addresses: Some(addresses),
                credentials: Some(credentials),
            },
            EitherOrBoth::Left((name, addresses)) => VmRecord {
                name,
                addresses: Some(addresses),
                credentials: None,
            },
            EitherOrBoth::Right((name, credentials)) => VmRecord {
                name,
                addresses: None,
                credentials: Some(credentials),
            },
        })
        .collect()
}
