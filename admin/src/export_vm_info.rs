use std::path::{Path, PathBuf};

use common::{
    export::{write_csv_report, write_host_files},
    listing::ListingCommand,
};

use crate::collect_vm_records;

/// Replace the contents of `export_dir` with one text file per VM.
pub async fn list_vm_info(
    vm_prefix: &str,
    listing: &ListingCommand,
    inventory_path: impl AsRef<Path>,
    export_dir: impl AsRef<Path>,
) -> anyhow::Result<Vec<PathBuf>> {
    let records = collect_vm_records(vm_prefix, listing, inventory_path).await?;

    let paths = write_host_files(export_dir, &records)?;
    for record in &records {
        println!("Created file for {}", record.name);
    }

    Ok(paths)
}

/// Write `<prefix>_VM_info.csv` into `export_dir`.
pub async fn save_vm_info_csv(
    vm_prefix: &str,
    listing: &ListingCommand,
    inventory_path: impl AsRef<Path>,
    export_dir: impl AsRef<Path>,
) -> anyhow::Result<PathBuf> {
    let records = collect_vm_records(vm_prefix, listing, inventory_path).await?;

    let path = write_csv_report(export_dir, vm_prefix, &records)?;

    println!("Created CSV file: {}", path.display());
    println!("Total VMs processed: {}", records.len());

    Ok(path)
}
