//! Example: Load a site database file and display a per-category overview.
//!
//! ```sh
//! cargo run -p honeychow-sites --example load-sites -- data/honeychow-sites.json
//! ```

use honeychow_sites::SiteLoader;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("honeychow-sites.json"), PathBuf::from);

    println!("Loading site database from {}...\n", path.display());

    let catalog = match SiteLoader::load_file(&path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(Box::new(e));
        }
    };

    println!("✓ Loaded {} site definitions\n", catalog.len());

    for (category, count) in catalog.category_counts() {
        println!("  • {category}: {count}");
    }

    let post_sites = catalog
        .sites()
        .iter()
        .filter(|site| site.post_body_template.is_some())
        .count();
    println!("\n  {post_sites} site(s) probe with POST");

    Ok(())
}
