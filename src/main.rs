//! Storefront shell

use std::io;

use anyhow::Result;
use tracing::info;

use storefront::{
    channel::{DeepLink, LinkWriter},
    config::StorefrontConfig,
    fixtures, observability,
    session::Session,
    shell,
};

fn main() -> Result<()> {
    // clap renders help, version and parse errors itself before exiting.
    let config = StorefrontConfig::load().unwrap_or_else(|e| e.exit());

    observability::init_subscriber(&config.logging)?;

    let catalog = match &config.catalog {
        Some(path) => fixtures::load(path)?,
        None => fixtures::builtin()?,
    };

    info!(
        store = catalog.store_name(),
        products = catalog.len(),
        "catalog ready"
    );

    let link = DeepLink::new(&config.channel_url)?;
    let mut channel = LinkWriter::new(link, io::stdout());
    let mut session = Session::new(&catalog);

    shell::run(
        &mut session,
        io::stdin().lock(),
        &mut io::stdout(),
        &mut channel,
    )?;

    Ok(())
}
