use std::collections::{BTreeMap, BTreeSet, HashSet};

use clap::ValueEnum;

use super::{HostLine, HostToken, Inventory, InventoryLine, TRAINING_GROUP};
use super::{ANSIBLE_HOST, TRAINING_PASSWORD};
use crate::vm_name::VmNamePattern;

/// How `update_host_addresses` rewrites a host line it has an address for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HostRewrite {
    /// Replace the whole line with `<name> ansible_host=<ip> ansible_user=ubuntu`.
    /// Any other variable on the line, the password included, is dropped.
    #[default]
    Replace,
    /// Only set `ansible_host`, keeping every other variable.
    Merge,
}

/// How `fill_missing_keys` decides which listed VMs are missing from the inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Alignment {
    /// With `n` matching hosts in the inventory, the listed VMs from index `n` onwards are
    /// missing. Names are not compared.
    #[default]
    Positional,
    /// Every listed VM without a host line of the same name is missing.
    ByName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Updated(String),
    NotUpdated(String),
    Added(String),
}

#[derive(Debug, Default)]
pub struct IpUpdateReport {
    pub outcomes: Vec<LineOutcome>,
}

impl IpUpdateReport {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, LineOutcome::Updated(_)))
    }

    pub fn added(&self) -> usize {
        self.count(|o| matches!(o, LineOutcome::Added(_)))
    }

    fn count(&self, f: impl Fn(&LineOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(o)).count()
    }
}

/// Point every host line at its current address and append lines for VMs the inventory
/// does not know about yet, in name order.
///
/// A host line belongs to a VM when its name is the VM name. Failing that, the first VM
/// (in name order) whose name appears anywhere in the line text is used.
pub fn update_host_addresses(
    inventory: &mut Inventory,
    addresses: &BTreeMap<String, String>,
    rewrite: HostRewrite,
) -> IpUpdateReport {
    let mut report = IpUpdateReport::default();
    let mut matched = BTreeSet::new();

    for line in inventory.lines.iter_mut() {
        let host = match line {
            InventoryLine::Group(_) => continue,
            InventoryLine::Other(text) => {
                report
                    .outcomes
                    .push(LineOutcome::NotUpdated(text.trim().to_string()));
                continue;
            }
            InventoryLine::Host(host) => host,
        };

        let Some((vm_name, ip)) = vm_for_host(host, addresses) else {
            report.outcomes.push(LineOutcome::NotUpdated(host.render()));
            continue;
        };

        let before = host.render();
        match rewrite {
            HostRewrite::Replace => *host = HostLine::with_address(vm_name, ip),
            HostRewrite::Merge => host.set(ANSIBLE_HOST, ip),
        }
        let after = host.render();

        matched.insert(vm_name.clone());

        if after == before {
            report.outcomes.push(LineOutcome::NotUpdated(after));
        } else {
            report.outcomes.push(LineOutcome::Updated(after));
        }
    }

    for (vm_name, ip) in addresses {
        if !matched.contains(vm_name) {
            let host = HostLine::with_address(vm_name, ip);
            report.outcomes.push(LineOutcome::Added(host.render()));
            inventory.push_host(host);
        }
    }

    report
}

fn vm_for_host<'a>(
    host: &HostLine,
    addresses: &'a BTreeMap<String, String>,
) -> Option<(&'a String, &'a String)> {
    if let Some(entry) = addresses.get_key_value(host.name()) {
        return Some(entry);
    }

    let text = host.render();
    let entry = addresses
        .iter()
        .find(|(vm_name, _)| text.contains(vm_name.as_str()))?;

    tracing::warn!("Host {} matched VM {} by substring", host.name(), entry.0);

    Some(entry)
}

#[derive(Debug, Default)]
pub struct KeyUpdateReport {
    /// Number of VMs printed by the listing helper
    pub listed: usize,
    /// Existing hosts that were given a new password
    pub passwords_added: Vec<String>,
    /// Existing hosts that were given an empty `ansible_host`
    pub addresses_blanked: Vec<String>,
    /// Hosts appended to the inventory
    pub hosts_added: Vec<String>,
}

/// Give every `<prefix>...` host a password and an `ansible_host` variable, then add a
/// line for each listed VM the inventory is missing, see [`Alignment`].
///
/// Existing variables are never changed. New hosts get an empty `ansible_host`, their
/// address is filled in by `update-ip`. The inventory ends up with a single `[training]`
/// header and new hosts are appended at the end of that group, which is the end of the
/// file unless another group follows it.
pub fn fill_missing_keys(
    inventory: &mut Inventory,
    vm_prefix: &str,
    vm_names: &[String],
    alignment: Alignment,
    mut new_password: impl FnMut() -> String,
) -> KeyUpdateReport {
    let pattern = VmNamePattern::loose(vm_prefix);
    let mut report = KeyUpdateReport {
        listed: vm_names.len(),
        ..Default::default()
    };

    inventory.ensure_group(TRAINING_GROUP);

    let mut existing = HashSet::new();
    let mut processed = 0;

    for line in inventory.lines.iter_mut() {
        let InventoryLine::Host(host) = line else {
            continue;
        };
        if !pattern.is_match(host.name()) {
            continue;
        }

        if !host.has(TRAINING_PASSWORD) {
            host.push(HostToken::quoted_var(TRAINING_PASSWORD, &new_password()));
            report.passwords_added.push(host.name().to_string());
        }

        if !host.has(ANSIBLE_HOST) {
            host.insert_after_name(HostToken::var(ANSIBLE_HOST, ""));
            report.addresses_blanked.push(host.name().to_string());
        }

        existing.insert(host.name().to_string());
        processed += 1;
    }

    let missing: Vec<&String> = match alignment {
        Alignment::Positional => {
            let missing: Vec<&String> = vm_names.iter().skip(processed).collect();
            for name in &missing {
                if existing.contains(name.as_str()) {
                    tracing::warn!(
                        "{} is already in the inventory but is added again: hosts are matched \
                         to listed VMs by position, not by name",
                        name
                    );
                }
            }
            missing
        }
        Alignment::ByName => {
            let mut seen = HashSet::new();
            vm_names
                .iter()
                .filter(|name| !existing.contains(name.as_str()))
                .filter(|name| seen.insert(name.as_str()))
                .collect()
        }
    };

    let mut insert_at = inventory.group_end(TRAINING_GROUP);
    for name in missing {
        let host = HostLine::with_password(name, &new_password());
        inventory.lines.insert(insert_at, InventoryLine::Host(host));
        insert_at += 1;
        report.hosts_added.push(name.clone());
    }

    report
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{fill_missing_keys, update_host_addresses, Alignment, HostRewrite, LineOutcome};
    use crate::inventory::Inventory;

    fn addresses(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(name, ip)| (name.to_string(), ip.to_string()))
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("pw{n}")
        }
    }

    #[test]
    fn replace_drops_other_variables() {
        let mut inventory = Inventory::parse(
            "[training]\ndemo-01 ansible_host=10.0.0.4 ansible_user=ubuntu training_password=\"x\"\n",
        );

        let report = update_host_addresses(
            &mut inventory,
            &addresses(&[("demo-01", "203.0.113.9")]),
            HostRewrite::Replace,
        );

        assert_eq!(
            inventory.render(),
            "[training]\ndemo-01 ansible_host=203.0.113.9 ansible_user=ubuntu\n"
        );
        assert_eq!(report.updated(), 1);
        assert_eq!(report.added(), 0);
    }

    #[test]
    fn merge_keeps_password() {
        let mut inventory = Inventory::parse(
            "[training]\ndemo-01 ansible_host=10.0.0.4 ansible_user=ubuntu training_password=\"x\"\n",
        );

        update_host_addresses(
            &mut inventory,
            &addresses(&[("demo-01", "203.0.113.9")]),
            HostRewrite::Merge,
        );

        assert_eq!(
            inventory.render(),
            "[training]\ndemo-01 ansible_host=203.0.113.9 ansible_user=ubuntu training_password=\"x\"\n"
        );
    }

    #[test]
    fn appends_unknown_vms_sorted() {
        let mut inventory = Inventory::parse("[training]\n# managed by update-ip\n");

        let report = update_host_addresses(
            &mut inventory,
            &addresses(&[("demo-03", "10.0.0.3"), ("demo-01", "10.0.0.1")]),
            HostRewrite::Replace,
        );

        assert_eq!(
            inventory.render(),
            "[training]\n# managed by update-ip\n\
             demo-01 ansible_host=10.0.0.1 ansible_user=ubuntu\n\
             demo-03 ansible_host=10.0.0.3 ansible_user=ubuntu\n"
        );
        assert_eq!(
            report.outcomes,
            vec![
                LineOutcome::NotUpdated("# managed by update-ip".into()),
                LineOutcome::Added("demo-01 ansible_host=10.0.0.1 ansible_user=ubuntu".into()),
                LineOutcome::Added("demo-03 ansible_host=10.0.0.3 ansible_user=ubuntu".into()),
            ]
        );
    }

    #[test]
    fn leaves_unlisted_hosts_alone() {
        let text = "[training]\nother-01   ansible_host=10.9.9.9\n";
        let mut inventory = Inventory::parse(text);

        let report = update_host_addresses(&mut inventory, &BTreeMap::new(), HostRewrite::Replace);

        assert_eq!(inventory.render(), text);
        assert_eq!(report.updated(), 0);
    }

    #[test]
    fn exact_name_wins_over_substring() {
        let mut inventory = Inventory::parse("demo-10 ansible_host=old\n");

        update_host_addresses(
            &mut inventory,
            &addresses(&[("demo-1", "10.0.0.1"), ("demo-10", "10.0.0.10")]),
            HostRewrite::Replace,
        );

        assert_eq!(
            inventory.render(),
            "demo-10 ansible_host=10.0.0.10 ansible_user=ubuntu\n\
             demo-1 ansible_host=10.0.0.1 ansible_user=ubuntu\n"
        );
    }

    #[test]
    fn substring_match_renames_line() {
        let mut inventory = Inventory::parse("demo-01.lab ansible_host=old\n");

        update_host_addresses(
            &mut inventory,
            &addresses(&[("demo-01", "10.0.0.1")]),
            HostRewrite::Replace,
        );

        assert_eq!(
            inventory.render(),
            "demo-01 ansible_host=10.0.0.1 ansible_user=ubuntu\n"
        );
    }

    #[test]
    fn second_ip_update_is_idempotent() {
        let ips = addresses(&[("demo-01", "203.0.113.9"), ("demo-02", "203.0.113.10")]);

        let mut inventory = Inventory::parse(
            "[training]\ndemo-01 ansible_host=10.0.0.4 training_password=\"x\"\n\ndemo-05 foo\n",
        );
        update_host_addresses(&mut inventory, &ips, HostRewrite::Replace);
        let first = inventory.render();

        let mut inventory = Inventory::parse(&first);
        let report = update_host_addresses(&mut inventory, &ips, HostRewrite::Replace);
        let second = inventory.render();

        assert_eq!(first, second);
        assert_eq!(report.updated(), 0);
        assert_eq!(report.added(), 0);
    }

    #[test]
    fn fills_password_and_blank_address() {
        let mut inventory = Inventory::parse("[training]\ndemo-01 ansible_user=ubuntu\n");

        let report = fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(
            inventory.render(),
            "[training]\ndemo-01 ansible_host= ansible_user=ubuntu training_password=\"pw1\"\n"
        );
        assert_eq!(report.passwords_added, vec!["demo-01"]);
        assert_eq!(report.addresses_blanked, vec!["demo-01"]);
        assert!(report.hosts_added.is_empty());
    }

    #[test]
    fn complete_hosts_are_untouched() {
        let text = "[training]\ndemo-01  ansible_host=1.2.3.4 training_password=\"keep\"\n";
        let mut inventory = Inventory::parse(text);

        let report = fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(inventory.render(), text);
        assert!(report.passwords_added.is_empty());
    }

    #[test]
    fn positional_shortfall_appends_tail_of_listing() {
        let mut inventory = Inventory::parse(
            "[training]\n\
             demo-01 ansible_host=1.1.1.1 training_password=\"a\"\n\
             demo-02 ansible_host=1.1.1.2 training_password=\"b\"\n",
        );

        let report = fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01", "demo-02", "demo-03", "demo-04"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(report.listed, 4);
        assert_eq!(report.hosts_added, vec!["demo-03", "demo-04"]);
        assert_eq!(
            inventory.render(),
            "[training]\n\
             demo-01 ansible_host=1.1.1.1 training_password=\"a\"\n\
             demo-02 ansible_host=1.1.1.2 training_password=\"b\"\n\
             demo-03 ansible_host= ansible_user=ubuntu training_password=\"pw1\"\n\
             demo-04 ansible_host= ansible_user=ubuntu training_password=\"pw2\"\n"
        );
    }

    #[test]
    fn positional_alignment_ignores_names() {
        // The listing order differs from the inventory order, positional alignment
        // re-adds demo-01 and never adds demo-03
        let mut inventory = Inventory::parse(
            "[training]\ndemo-02 ansible_host= training_password=\"b\"\n",
        );

        let report = fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-03", "demo-01"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(report.hosts_added, vec!["demo-01"]);
    }

    #[test]
    fn by_name_alignment_adds_each_missing_vm_once() {
        let mut inventory = Inventory::parse(
            "[training]\ndemo-02 ansible_host= training_password=\"b\"\n",
        );

        let report = fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-03", "demo-02", "demo-01", "demo-03"]),
            Alignment::ByName,
            counter(),
        );

        assert_eq!(report.hosts_added, vec!["demo-03", "demo-01"]);
    }

    #[test]
    fn adds_header_and_keeps_other_groups() {
        let mut inventory = Inventory::parse("demo-01 ansible_host=\n[other]\nweb-01\n");

        fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01", "demo-02"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(
            inventory.render(),
            "[training]\n\
             demo-01 ansible_host= training_password=\"pw1\"\n\
             demo-02 ansible_host= ansible_user=ubuntu training_password=\"pw2\"\n\
             [other]\n\
             web-01\n"
        );
    }

    #[test]
    fn new_hosts_follow_trailing_lines() {
        let mut inventory = Inventory::parse(
            "[training]\ndemo-01 ansible_host= training_password=\"a\"\n\n# trailing note\n",
        );

        fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01", "demo-02"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(
            inventory.render(),
            "[training]\n\
             demo-01 ansible_host= training_password=\"a\"\n\
             \n\
             # trailing note\n\
             demo-02 ansible_host= ansible_user=ubuntu training_password=\"pw1\"\n"
        );
    }

    #[test]
    fn empty_inventory_gets_header_and_hosts() {
        let mut inventory = Inventory::default();

        fill_missing_keys(
            &mut inventory,
            "demo",
            &names(&["demo-01"]),
            Alignment::Positional,
            counter(),
        );

        assert_eq!(
            inventory.render(),
            "[training]\ndemo-01 ansible_host= ansible_user=ubuntu training_password=\"pw1\"\n"
        );
    }
}
