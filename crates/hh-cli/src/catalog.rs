use anyhow::Context;
use clap::Subcommand;
use hh_core::{AppConfig, Catalog, PROVINCES};

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Load and validate the catalog file
    Validate,
}

/// Load the catalog named by `HH_CATALOG_PATH` and report what it holds.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub(crate) fn run_catalog_validate(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = hh_core::load_catalog(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;
    println!(
        "{} is valid: {}",
        config.catalog_path.display(),
        summarize(&catalog)
    );
    Ok(())
}

fn summarize(catalog: &Catalog) -> String {
    format!(
        "{} users, {} shops, {} products",
        catalog.users.len(),
        catalog.shops.len(),
        catalog.products.len()
    )
}

pub(crate) fn run_provinces() {
    println!("{:<20}{:<22}{:>10}{:>11}", "ID", "NAME", "LAT", "LNG");
    for p in PROVINCES {
        println!("{:<20}{:<22}{:>10.4}{:>11.4}", p.id, p.name, p.lat, p.lng);
    }
}
