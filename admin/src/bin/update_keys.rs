use clap::Parser;
use common::{
    clap::{parse_args_or_exit, InventoryConfig, ListingConfig},
    inventory::Alignment,
    tracing::init_tracing,
};
use training_admin::{exit_on_error, update_keys};

/// Give every training VM in the inventory a password and add a host line for each
/// listed VM the inventory is missing.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Prefix of the VM names
    vm_prefix: String,

    /// How listed VMs are matched to the hosts already in the inventory
    #[clap(long, value_enum, default_value_t = Alignment::Positional)]
    alignment: Alignment,

    /// Print the updated inventory instead of saving it
    #[clap(long)]
    dry_run: bool,

    #[command(flatten)]
    inventory: InventoryConfig,

    #[command(flatten)]
    listing: ListingConfig,
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
    update_keys(
        &cli.vm_prefix,
        &listing,
        &cli.inventory.path,
        cli.alignment,
        cli.dry_run,
    )
    .await?;

    Ok(())
}
