use clap::Parser;
use common::{
    clap::{parse_args_or_exit, InventoryConfig, ListingConfig},
    inventory::HostRewrite,
    tracing::init_tracing,
};
use training_admin::{exit_on_error, update_ip};

/// Update the `ansible_host` of every training VM in the inventory with its address on
/// the project network and add the VMs the inventory is missing.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Prefix of the VM names, VMs are named `<prefix>-<number>`
    vm_prefix: String,
    /// The network whose address is used, as printed in the listing (`<project-id>=<ip>`)
    project_id: String,

    /// Keep the other variables of updated host lines, such as the password, instead of
    /// rewriting the whole line
    #[clap(long)]
    preserve_fields: bool,

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
    let rewrite = if cli.preserve_fields {
        HostRewrite::Merge
    } else {
        HostRewrite::Replace
    };

    let listing = cli.listing.listing_command()?;
    update_ip(
        &cli.vm_prefix,
        &cli.project_id,
        &listing,
        &cli.inventory.path,
        rewrite,
        cli.dry_run,
    )
    .await?;

    Ok(())
}
