use clap::Parser;
use common::{
    clap::{parse_args_or_exit, ExportConfig, InventoryConfig, ListingConfig},
    tracing::init_tracing,
};
use training_admin::{exit_on_error, save_vm_info_csv};

/// Write a `<prefix>_VM_info.csv` report with the username, public IP and password of
/// every training VM.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Prefix of the VM names, VMs are named `<prefix>-<number>`
    vm_prefix: String,

    #[command(flatten)]
    inventory: InventoryConfig,

    #[command(flatten)]
    listing: ListingConfig,

    #[command(flatten)]
    export: ExportConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli: Cli = parse_args_or_exit();
    init_tracing("warn");

    tracing::debug!("Starting with config: {:?}", cli);

    exit_on_error(run(cli).await);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let listing = cli.listing.listing_command()?;
    save_vm_info_csv(
        &cli.vm_prefix,
        &listing,
        &cli.inventory.path,
        &cli.export.directory,
    )
    .await?;

    Ok(())
}
