use std::path::Path;

use common::{
    inventory::{update_host_addresses, HostRewrite, Inventory, IpUpdateReport, LineOutcome},
    listing::{parse_project_addresses, ListingCommand},
};

/// Point the inventory hosts of `vm_prefix` at their address on the `project_id` network
/// and add the listed VMs the inventory is missing.
///
/// With `dry_run` the resulting inventory is printed instead of saved.
pub async fn update_ip(
    vm_prefix: &str,
    project_id: &str,
    listing: &ListingCommand,
    inventory_path: impl AsRef<Path>,
    rewrite: HostRewrite,
    dry_run: bool,
) -> anyhow::Result<IpUpdateReport> {
    let inventory_path = inventory_path.as_ref();
    let mut inventory = Inventory::load(inventory_path)?;

    println!("Running listing command...");
    let output = listing.list(vm_prefix).await?;
    let addresses = parse_project_addresses(&output, vm_prefix, project_id);

    for (vm_name, ip) in &addresses {
        println!("Found VM: {vm_name} with IP: {ip}");
    }
    if addresses.is_empty() {
        tracing::warn!("No {vm_prefix} VMs with a {project_id} address were listed");
    }

    let report = update_host_addresses(&mut inventory, &addresses, rewrite);

    for outcome in &report.outcomes {
        match outcome {
            LineOutcome::Updated(line) => println!("Updated: {line}"),
            LineOutcome::NotUpdated(line) => println!("Not updated: {line}"),
            LineOutcome::Added(line) => println!("Added: {line}"),
        }
    }
    tracing::info!(
        "{} hosts updated, {} hosts added",
        report.updated(),
        report.added()
    );

    if dry_run {
        print!("{}", inventory.render());
        return Ok(report);
    }

    inventory.save(inventory_path)?;
    println!("Inventory file updated with correct IP addresses and missing VMs added.");

    Ok(report)
}
