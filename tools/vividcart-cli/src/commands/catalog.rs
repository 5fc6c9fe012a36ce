//! Catalog listing.

use anyhow::Result;
use vividcart_commerce::catalog::Product;
use vividcart_commerce::search::SearchResults;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let results = SearchResults::run(&catalog, args.search.unwrap_or_default());

    if ctx.output.is_json() {
        let products: Vec<&Product> = results.products.iter().map(|p| p.as_ref()).collect();
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Featured products");
    if results.is_empty() {
        ctx.output.info(&format!(
            "No products match \"{}\"",
            results.query.as_str()
        ));
        return Ok(());
    }

    ctx.output.products(results.products.iter().map(|p| p.as_ref()));
    ctx.output.info(&results.count_label());
    Ok(())
}
