use clap::Parser;
use common::{
    clap::{parse_args_or_exit, ExportConfig, InventoryConfig, ListingConfig},
    tracing::init_tracing,
};
use training_admin::{exit_on_error, list_vm_info};

/// Write one text file per training VM with its username, password and public IP.
/// The export directory is emptied first.
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
    list_vm_info(
        &cli.vm_prefix,
        &listing,
        &cli.inventory.path,
        &cli.export.directory,
    )
    .await?;

    Ok(())
}
