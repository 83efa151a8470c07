//! `safra products`: register and list monitored products.

use clap::Subcommand;

use safra_io::ProductStore;

use crate::{print_json, CliError, Context, GlobalArgs};

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// Register a new product for an origin
    #[command(after_help = "\
Examples:
  safra products add 'café arábica' Brasil
  safra products add SOJA Argentina --json")]
    Add {
        /// Product name (stored upper-cased)
        name: String,

        /// Origin (country or region)
        origin: String,

        #[arg(long)]
        json: bool,
    },

    /// List recently registered products, newest first
    Recent {
        /// Maximum rows (default from settings)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_products(global: &GlobalArgs, cmd: ProductsCommands) -> Result<(), CliError> {
    match cmd {
        ProductsCommands::Add { name, origin, json } => cmd_products_add(global, &name, &origin, json),
        ProductsCommands::Recent { limit, json } => cmd_products_recent(global, limit, json),
    }
}

fn cmd_products_add(global: &GlobalArgs, name: &str, origin: &str, json: bool) -> Result<(), CliError> {
    let mut ctx = Context::load(global)?;
    let store = ProductStore::new(&ctx.settings.data.products);

    let row = store.add_product(name, origin).map_err(CliError::source)?;

    // The product file changed; drop any cached snapshot before reporting
    ctx.invalidate();

    if json {
        return print_json(&row);
    }

    let origin = row.origin.as_deref().unwrap_or("");
    println!("added {} ({})", row.name, origin);

    match ctx.snapshot() {
        Ok(snapshot) => {
            let report = safra_recon::run(&snapshot);
            eprintln!(
                "{} product(s) monitored, {} tracked in the report",
                report.metrics.total_products, report.metrics.tracked_products
            );
        }
        Err(e) => log::warn!("product saved but snapshot reload failed: {}", e.message),
    }
    Ok(())
}

fn cmd_products_recent(global: &GlobalArgs, limit: Option<usize>, json: bool) -> Result<(), CliError> {
    let ctx = Context::load(global)?;
    let store = ProductStore::new(&ctx.settings.data.products);
    let limit = limit.unwrap_or(ctx.settings.display.recent_products_limit);

    let rows = store.recent_additions(limit).map_err(CliError::source)?;

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("no products registered yet");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:<24} {:<16} {}",
            row.name,
            row.origin.as_deref().unwrap_or(""),
            row.created_at.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
