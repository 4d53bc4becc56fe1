use std::{sync::Arc, time::Duration};

use cartline_app::{
    database,
    domain::items::{
        DefaultItemsService, ItemsCache, ItemsService, PgItemsRepository, data::NewItem,
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateItemArgs {
    /// Item display name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateItemArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // Nothing reads the catalog in this process, so the cache only needs to exist.
    let service = DefaultItemsService::new(
        Arc::new(PgItemsRepository::new(pool)),
        ItemsCache::with_ttl(Duration::from_secs(1)),
    );

    let item = service
        .create_item(NewItem {
            name: args.name,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create item: {error}"))?;

    println!("item_id: {}", item.id);
    println!("item_name: {}", item.name);
    println!("item_price: {}", item.price);

    Ok(())
}
