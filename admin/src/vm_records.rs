use std::path::Path;

use common::{
    inventory::{read_credentials, Inventory},
    listing::{parse_vm_addresses, ListingCommand},
    vm_info::{merge_records, VmRecord},
};

/// Merge the addresses printed by the listing helper with the credentials in the inventory.
pub async fn collect_vm_records(
    vm_prefix: &str,
    listing: &ListingCommand,
    inventory_path: impl AsRef<Path>,
) -> anyhow::Result<Vec<VmRecord>> {
    let inventory = Inventory::load(inventory_path)?;
    let credentials = read_credentials(&inventory, vm_prefix);

    println!("Listing IP addresses...");
    let output = listing.list(vm_prefix).await?;
    let addresses = parse_vm_addresses(&output, vm_prefix);

    tracing::info!(
        "{} VMs listed, {} in the inventory",
        addresses.len(),
        credentials.len()
    );

    Ok(merge_records(addresses, credentials))
}
