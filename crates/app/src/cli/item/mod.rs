use clap::{Args, Subcommand};

mod create;

/// Manage catalog items
#[derive(Debug, Args)]
pub(crate) struct ItemCommand {
    #[command(subcommand)]
    command: ItemSubcommand,
}

#[derive(Debug, Subcommand)]
enum ItemSubcommand {
    Create(create::CreateItemArgs),
}

pub(crate) async fn run(command: ItemCommand) -> Result<(), String> {
    match command.command {
        ItemSubcommand::Create(args) => create::run(args).await,
    }
}
