use std::path::Path;

use common::{
    generators::{PasswordGenerator, PasswordPolicy, DEFAULT_PASSWORD_LENGTH},
    inventory::{fill_missing_keys, Alignment, Inventory, KeyUpdateReport},
    listing::{parse_vm_names, ListingCommand},
};

/// Make sure every listed VM of `vm_prefix` has a host line with a password.
///
/// With `dry_run` the resulting inventory is printed instead of saved.
pub async fn update_keys(
    vm_prefix: &str,
    listing: &ListingCommand,
    inventory_path: impl AsRef<Path>,
    alignment: Alignment,
    dry_run: bool,
) -> anyhow::Result<KeyUpdateReport> {
    let inventory_path = inventory_path.as_ref();
    let mut inventory = Inventory::load(inventory_path)?;

    let output = listing.list(vm_prefix).await?;
    let vm_names = parse_vm_names(&output, vm_prefix);

    let generator = PasswordGenerator::new(PasswordPolicy::Inventory);
    let report = fill_missing_keys(&mut inventory, vm_prefix, &vm_names, alignment, || {
        generator.generate(DEFAULT_PASSWORD_LENGTH)
    });

    for name in &report.passwords_added {
        tracing::info!("Generated a password for {name}");
    }
    for name in &report.addresses_blanked {
        tracing::info!("Added an empty ansible_host to {name}");
    }
    for name in &report.hosts_added {
        tracing::info!("Added {name} to the inventory");
    }

    if dry_run {
        print!("{}", inventory.render());
        return Ok(report);
    }

    inventory.save(inventory_path)?;
    println!("Inventory updated with {} VMs.", report.listed);

    Ok(report)
}
